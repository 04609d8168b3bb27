//! 组件解析器抽象接口
//!
//! 提供依赖解析的能力

use crate::lazy::LazyHandle;
use di_common::{ComponentRef, DependencyResult};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除后的组件实例
///
/// 内部保存的是 `Arc<T>`，`T` 为绑定的组件类型（可以是 `dyn Trait`）。
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 擦除组件实例的类型
pub fn erase<T: ?Sized + Send + Sync + 'static>(component: Arc<T>) -> Instance {
    Arc::new(component)
}

/// 还原组件实例的类型
pub fn downcast<T: ?Sized + Send + Sync + 'static>(instance: &Instance) -> Option<Arc<T>> {
    instance.downcast_ref::<Arc<T>>().cloned()
}

/// 解析结果
#[derive(Debug, Clone)]
pub enum Resolved {
    /// 已构造的实例
    Instance(Instance),
    /// 延迟句柄
    Lazy(LazyHandle),
}

/// 组件解析器 trait
///
/// 负责把组件引用解析为实例；未绑定时返回 `Ok(None)`。
pub trait ComponentResolver: Send + Sync {
    /// 解析组件引用
    fn resolve(&self, component: &ComponentRef) -> DependencyResult<Option<Resolved>>;
}
