//! 延迟句柄
//!
//! 延迟句柄只记录组件键和对上下文的弱引用，调用 `get` 时才真正解析。
//! 构建期的依赖图校验不会沿延迟句柄递归，因此它是表达结构性循环的唯一方式。

use crate::resolver::{downcast, ComponentResolver, Instance, Resolved};
use di_common::{ComponentKey, ComponentRef, DependencyError, DependencyResult};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};
use tracing::debug;

/// 类型擦除的延迟句柄
#[derive(Clone)]
pub struct LazyHandle {
    key: ComponentKey,
    resolver: Weak<dyn ComponentResolver>,
}

impl LazyHandle {
    /// 创建延迟句柄
    pub fn new(key: ComponentKey, resolver: Weak<dyn ComponentResolver>) -> Self {
        Self { key, resolver }
    }

    /// 组件键
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// 立即解析
    pub fn resolve(&self) -> DependencyResult<Instance> {
        let resolver = self
            .resolver
            .upgrade()
            .ok_or_else(|| DependencyError::ContextDropped {
                key: self.key.clone(),
            })?;

        debug!("解析延迟句柄: {}", self.key);
        match resolver.resolve(&ComponentRef::from(self.key.clone()))? {
            Some(Resolved::Instance(instance)) => Ok(instance),
            _ => Err(DependencyError::ComponentNotBound {
                key: self.key.clone(),
            }),
        }
    }
}

impl fmt::Debug for LazyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyHandle")
            .field("key", &self.key)
            .field("context_alive", &(self.resolver.strong_count() > 0))
            .finish()
    }
}

/// 延迟句柄
///
/// 作为注入点类型使用时（`Lazy<dyn Service>`），依赖在第一次调用
/// [`get`](Lazy::get) 时才解析；每次调用都遵循被引用组件的作用域。
pub struct Lazy<T: ?Sized> {
    handle: LazyHandle,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Lazy<T> {
    /// 由类型擦除的句柄创建
    pub fn new(handle: LazyHandle) -> Self {
        Self {
            handle,
            _marker: PhantomData,
        }
    }

    /// 解析组件
    pub fn get(&self) -> DependencyResult<Arc<T>> {
        let instance = self.handle.resolve()?;
        downcast::<T>(&instance).ok_or_else(|| DependencyError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
        })
    }

    /// 组件键
    pub fn key(&self) -> &ComponentKey {
        self.handle.key()
    }
}

impl<T: ?Sized> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lazy").field(&self.handle).finish()
    }
}
