//! 注入点类型
//!
//! [`Resolvable`] 把注入点声明的 Rust 类型映射为组件引用：
//! `Arc<T>` 直接引用 `T`，`Lazy<T>` 以延迟句柄引用 `T`，
//! `Vec<Arc<T>>` 是容器不支持的包装，解析结果总是为空。

use crate::lazy::Lazy;
use crate::resolver::{downcast, Resolved};
use di_common::{
    ComponentKey, ComponentRef, ContainerKind, DependencyError, DependencyResult, Qualifier,
    TypeInfo,
};
use std::sync::Arc;

/// 可作为注入点类型的 trait
pub trait Resolvable: Sized + Send + Sync + 'static {
    /// 注入点对应的组件引用
    fn component_ref(qualifier: Qualifier) -> ComponentRef;

    /// 从解析结果还原
    fn from_resolved(resolved: Resolved) -> DependencyResult<Self>;
}

fn mismatch<T: ?Sized>() -> DependencyError {
    DependencyError::TypeMismatch {
        expected: std::any::type_name::<T>().to_string(),
    }
}

impl<T: ?Sized + Send + Sync + 'static> Resolvable for Arc<T> {
    fn component_ref(qualifier: Qualifier) -> ComponentRef {
        ComponentRef::new(ComponentKey::new(TypeInfo::of::<T>(), qualifier), None)
    }

    fn from_resolved(resolved: Resolved) -> DependencyResult<Self> {
        match resolved {
            Resolved::Instance(instance) => downcast::<T>(&instance).ok_or_else(mismatch::<T>),
            Resolved::Lazy(_) => Err(mismatch::<T>()),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Resolvable for Lazy<T> {
    fn component_ref(qualifier: Qualifier) -> ComponentRef {
        ComponentRef::lazy::<T>(qualifier)
    }

    fn from_resolved(resolved: Resolved) -> DependencyResult<Self> {
        match resolved {
            Resolved::Lazy(handle) => Ok(Self::new(handle)),
            Resolved::Instance(_) => Err(mismatch::<Self>()),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Resolvable for Vec<Arc<T>> {
    fn component_ref(qualifier: Qualifier) -> ComponentRef {
        ComponentRef::new(
            ComponentKey::new(TypeInfo::of::<T>(), qualifier),
            Some(ContainerKind::Unsupported(TypeInfo::of::<Self>())),
        )
    }

    fn from_resolved(_resolved: Resolved) -> DependencyResult<Self> {
        Err(mismatch::<Self>())
    }
}

/// 实现类型到绑定类型的转换
///
/// 每个类型都能转换为自身；转换为 trait 对象时使用 [`implements!`](crate::implements)。
pub trait Upcast<T: ?Sized>: Send + Sync + 'static {
    /// 转换
    fn upcast(self: Arc<Self>) -> Arc<T>;
}

impl<T: Send + Sync + 'static> Upcast<T> for T {
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// 声明实现类型可以绑定为哪些 trait 对象
///
/// ```rust
/// use di_abstractions::implements;
///
/// trait Clock: Send + Sync {}
/// struct SystemClock;
/// impl Clock for SystemClock {}
///
/// implements!(SystemClock: dyn Clock);
/// ```
#[macro_export]
macro_rules! implements {
    ($component:ty : $($interface:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<$interface> for $component {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$interface> {
                    self
                }
            }
        )+
    };
}
