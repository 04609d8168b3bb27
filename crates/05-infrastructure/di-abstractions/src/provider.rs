//! 组件提供者抽象接口
//!
//! 提供者负责构造组件实例，作用域装饰器也实现同一接口。

use crate::resolver::{ComponentResolver, Instance};
use di_common::{ComponentRef, DependencyResult};
use std::sync::Arc;

/// 组件提供者 trait
pub trait ComponentProvider: Send + Sync {
    /// 构造（或取出缓存的）组件实例
    fn get(&self, context: &dyn ComponentResolver) -> DependencyResult<Instance>;

    /// 声明的依赖列表，不调用 [`get`](Self::get) 即可获得，且每次相同
    fn dependencies(&self) -> &[ComponentRef] {
        &[]
    }
}

/// 作用域工厂：把提供者包装为带生命周期策略的提供者
pub type ScopeFactory =
    Arc<dyn Fn(Arc<dyn ComponentProvider>) -> Arc<dyn ComponentProvider> + Send + Sync>;
