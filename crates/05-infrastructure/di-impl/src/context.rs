//! 上下文
//!
//! 由 [`ContextConfig::build`](crate::ContextConfig::build) 生成的只读解析器。

use di_abstractions::{
    AnnotationValue, ComponentKey, ComponentProvider, ComponentRef, ComponentResolver,
    ContainerKind, DependencyResult, LazyHandle, Qualifier, Resolvable, Resolved,
};
use std::collections::HashMap;
use std::fmt;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

pub(crate) type ProviderTable = HashMap<ComponentKey, Arc<dyn ComponentProvider>>;

/// 同一个 [`ContextConfig`](crate::ContextConfig) 的所有上下文共享的解析目标
///
/// 单例和池在多次 `build` 之间共享，其中的延迟句柄因此不能指向某一次构建的上下文；
/// 句柄弱引用这里，解析时总是使用最近一次构建的提供者表。
/// 注册表与全部上下文都释放后句柄才失效。
pub(crate) struct SharedTable {
    current: RwLock<Option<Arc<ContextInner>>>,
}

impl SharedTable {
    pub(crate) fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    fn publish(&self, inner: Arc<ContextInner>) {
        *self.current.write() = Some(inner);
    }
}

impl ComponentResolver for SharedTable {
    fn resolve(&self, component: &ComponentRef) -> DependencyResult<Option<Resolved>> {
        // 解析期间不持有锁，构造过程可能再次进入这里
        let current = self.current.read().clone();
        match current {
            Some(inner) => inner.resolve(component),
            None => Ok(None),
        }
    }
}

struct ContextInner {
    providers: ProviderTable,
    trace_resolution: bool,
    shared: Weak<SharedTable>,
}

impl ComponentResolver for ContextInner {
    fn resolve(&self, component: &ComponentRef) -> DependencyResult<Option<Resolved>> {
        if self.trace_resolution {
            debug!("解析组件: {}", component);
        }

        let key = component.key();
        match component.container() {
            None => match self.providers.get(key) {
                Some(provider) => provider.get(self).map(|instance| Some(Resolved::Instance(instance))),
                None => {
                    trace!("组件未绑定: {}", key);
                    Ok(None)
                }
            },
            Some(ContainerKind::Lazy) => {
                if !self.providers.contains_key(key) {
                    return Ok(None);
                }
                let resolver: Weak<dyn ComponentResolver> = self.shared.clone();
                Ok(Some(Resolved::Lazy(LazyHandle::new(key.clone(), resolver))))
            }
            Some(ContainerKind::Unsupported(container)) => {
                trace!("不支持的容器类型 {}: {}", container, key);
                Ok(None)
            }
        }
    }
}

/// 上下文
///
/// 克隆开销很小，所有克隆共享同一张提供者表。
/// 上下文创建的延迟句柄在注册表或任一上下文存活期间都可以解析。
///
/// # 示例
///
/// ```rust
/// use di_impl::ContextConfig;
/// use std::sync::Arc;
///
/// let mut config = ContextConfig::new();
/// config.bind_instance(Arc::new("postgres://localhost".to_string()), &[]).unwrap();
///
/// let context = config.build().unwrap();
/// let url: Option<Arc<String>> = context.get().unwrap();
/// assert_eq!(url.as_deref().map(String::as_str), Some("postgres://localhost"));
/// ```
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
    _shared: Arc<SharedTable>,
}

impl Context {
    pub(crate) fn new(
        providers: ProviderTable,
        trace_resolution: bool,
        shared: &Arc<SharedTable>,
    ) -> Self {
        let inner = Arc::new(ContextInner {
            providers,
            trace_resolution,
            shared: Arc::downgrade(shared),
        });
        shared.publish(inner.clone());
        Self {
            inner,
            _shared: shared.clone(),
        }
    }

    /// 解析组件引用，未绑定时返回 `None`
    pub fn resolve(&self, component: &ComponentRef) -> DependencyResult<Option<Resolved>> {
        self.inner.resolve(component)
    }

    /// 按注入点类型解析无限定符的组件
    pub fn get<R: Resolvable>(&self) -> DependencyResult<Option<R>> {
        self.get_with(Qualifier::Default)
    }

    /// 按注入点类型解析带限定符的组件
    pub fn get_qualified<R: Resolvable>(
        &self,
        qualifier: impl Into<AnnotationValue>,
    ) -> DependencyResult<Option<R>> {
        self.get_with(Qualifier::annotated(qualifier))
    }

    fn get_with<R: Resolvable>(&self, qualifier: Qualifier) -> DependencyResult<Option<R>> {
        self.resolve(&R::component_ref(qualifier))?
            .map(R::from_resolved)
            .transpose()
    }

    /// 是否绑定了组件键
    pub fn is_bound(&self, key: &ComponentKey) -> bool {
        self.inner.providers.contains_key(key)
    }

    /// 全部已绑定的组件键
    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.inner.providers.keys()
    }
}

impl ComponentResolver for Context {
    fn resolve(&self, component: &ComponentRef) -> DependencyResult<Option<Resolved>> {
        self.inner.resolve(component)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("Context").field("bindings", &keys).finish()
    }
}
