//! 绑定注册表
//!
//! [`ContextConfig`] 收集绑定，在 [`build`](ContextConfig::build) 时校验依赖图并生成 [`Context`]。

use crate::context::{Context, ProviderTable, SharedTable};
use crate::providers::{InjectionProvider, InstanceProvider};
use crate::scope::{PooledProvider, SingletonProvider};
use di_abstractions::{
    Annotation, AnnotationValue, ComponentClass, ComponentKey, ComponentProvider, DependencyError,
    DependencyResult, IllegalComponentReason, Injectable, Qualifier, ScopeFactory, Singleton,
    TypeDescriptor, TypeInfo, Upcast,
};
use di_common::ContainerOptions;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 绑定注册表
///
/// # 示例
///
/// ```rust
/// use di_abstractions::{implements, ComponentClass, Constructor, Named};
/// use di_impl::ContextConfig;
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct FixedClock;
///
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 {
///         42
///     }
/// }
///
/// implements!(FixedClock: dyn Clock);
///
/// let mut config = ContextConfig::new();
/// config
///     .bind_type::<dyn Clock, FixedClock>(
///         ComponentClass::new("FixedClock").constructor(Constructor::new(|_| Ok(FixedClock))),
///         &[Named::new("fixed").into()],
///     )
///     .unwrap();
///
/// let context = config.build().unwrap();
/// let clock = context
///     .get_qualified::<Arc<dyn Clock>>(Named::new("fixed"))
///     .unwrap()
///     .unwrap();
/// assert_eq!(clock.now(), 42);
/// ```
pub struct ContextConfig {
    options: ContainerOptions,
    providers: ProviderTable,
    scopes: HashMap<TypeInfo, ScopeFactory>,
    shared: Arc<SharedTable>,
}

impl ContextConfig {
    /// 使用默认配置创建
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// 使用指定配置创建，单例作用域已注册
    pub fn with_options(options: ContainerOptions) -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(TypeInfo::of::<Singleton>(), SingletonProvider::factory());
        Self {
            options,
            providers: HashMap::new(),
            scopes,
            shared: Arc::new(SharedTable::new()),
        }
    }

    /// 容器配置
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// 注册自定义作用域
    pub fn scope<A, F>(&mut self, factory: F) -> &mut Self
    where
        A: Annotation,
        F: Fn(Arc<dyn ComponentProvider>) -> Arc<dyn ComponentProvider> + Send + Sync + 'static,
    {
        info!("注册作用域: {}", TypeInfo::of::<A>().short_name());
        self.scopes.insert(TypeInfo::of::<A>(), Arc::new(factory));
        self
    }

    /// 注册池化作用域，容量取自配置
    pub fn pooled_scope<A: Annotation>(&mut self) -> &mut Self {
        let factory = PooledProvider::factory(self.options.pool_capacity);
        self.scope::<A, _>(move |inner| factory(inner))
    }

    /// 绑定实例
    ///
    /// 每个限定符都注册同一个提供者；不带限定符时注册在默认限定符下。
    pub fn bind_instance<T>(
        &mut self,
        instance: Arc<T>,
        qualifiers: &[AnnotationValue],
    ) -> DependencyResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let component = TypeInfo::of::<T>();
        if qualifiers.iter().any(|q| !q.is_qualifier()) {
            return Err(DependencyError::illegal_component(
                component.name(),
                IllegalComponentReason::NotAQualifier,
            ));
        }

        self.insert_all(component, qualifiers, Arc::new(InstanceProvider::new(instance)))
    }

    /// 绑定实现类型
    ///
    /// `annotations` 可以包含限定符与作用域标记；显式作用域优先于实现类型上声明的作用域，
    /// 都没有时每次解析构造新实例。
    pub fn bind_type<T, I>(
        &mut self,
        class: ComponentClass<I>,
        annotations: &[AnnotationValue],
    ) -> DependencyResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
        I: Upcast<T>,
    {
        let component = TypeInfo::of::<T>();
        let name = class.name();
        let illegal = |reason| DependencyError::illegal_component(name, reason);

        if annotations.iter().any(|a| !a.is_qualifier() && !a.is_scope()) {
            return Err(illegal(IllegalComponentReason::NotAScopeOrQualifier));
        }
        let qualifiers: Vec<AnnotationValue> =
            annotations.iter().filter(|a| a.is_qualifier()).cloned().collect();
        let scopes: Vec<&AnnotationValue> = annotations.iter().filter(|a| a.is_scope()).collect();
        if scopes.len() > 1 {
            return Err(illegal(IllegalComponentReason::MultipleScopes));
        }

        let descriptor = TypeDescriptor::of(class)?;
        let scope = scopes
            .first()
            .map(|scope| (*scope).clone())
            .or_else(|| descriptor.declared_scope().cloned());

        let mut provider: Arc<dyn ComponentProvider> =
            Arc::new(InjectionProvider::<T, I>::new(descriptor));
        if let Some(scope) = scope {
            let factory = self
                .scopes
                .get(&scope.type_info())
                .ok_or_else(|| illegal(IllegalComponentReason::UnknownScope))?;
            debug!("应用作用域 {} 到 {}", scope, component);
            provider = factory(provider);
        }

        self.insert_all(component, &qualifiers, provider)
    }

    /// 绑定由 `#[derive(Injectable)]` 声明的实现类型
    pub fn bind_injectable<T, I>(&mut self, annotations: &[AnnotationValue]) -> DependencyResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
        I: Injectable + Upcast<T>,
    {
        self.bind_type::<T, I>(I::component_class(), annotations)
    }

    fn insert_all(
        &mut self,
        component: TypeInfo,
        qualifiers: &[AnnotationValue],
        provider: Arc<dyn ComponentProvider>,
    ) -> DependencyResult<()> {
        let keys: Vec<ComponentKey> = if qualifiers.is_empty() {
            vec![ComponentKey::new(component, Qualifier::Default)]
        } else {
            qualifiers
                .iter()
                .map(|q| ComponentKey::new(component, Qualifier::Annotated(q.clone())))
                .collect()
        };

        if !self.options.allow_override {
            if let Some(key) = keys.iter().find(|k| self.providers.contains_key(*k)) {
                return Err(DependencyError::DuplicateBinding { key: key.clone() });
            }
        }

        for key in keys {
            info!("绑定组件: {}", key);
            if self.providers.insert(key.clone(), provider.clone()).is_some() {
                warn!("覆盖已有绑定: {}", key);
            }
        }
        Ok(())
    }

    /// 是否绑定了组件键
    pub fn is_bound(&self, key: &ComponentKey) -> bool {
        self.providers.contains_key(key)
    }

    /// 校验依赖图并生成上下文
    ///
    /// 可以多次调用；生成的上下文共享已装饰的提供者，因此作用域内的缓存也是共享的。
    /// 延迟句柄总是按最近一次构建的上下文解析。
    pub fn build(&self) -> DependencyResult<Context> {
        for component in self.providers.keys() {
            self.check_dependencies(component, &mut Vec::new())?;
        }

        info!("上下文构建完成，共 {} 个绑定", self.providers.len());
        Ok(Context::new(
            self.providers.clone(),
            self.options.trace_resolution,
            &self.shared,
        ))
    }

    fn check_dependencies(
        &self,
        component: &ComponentKey,
        visiting: &mut Vec<ComponentKey>,
    ) -> DependencyResult<()> {
        let Some(provider) = self.providers.get(component) else {
            return Ok(());
        };

        for dependency in provider.dependencies() {
            let key = dependency.key();
            if !self.providers.contains_key(key) {
                return Err(DependencyError::DependencyNotFound {
                    component: component.clone(),
                    dependency: key.clone(),
                });
            }
            // 容器引用只检查存在性，延迟句柄不参与环检测
            if dependency.is_container() {
                continue;
            }
            // 只报告环上的键，通向环的路径不算在内
            if let Some(start) = visiting.iter().position(|k| k == key) {
                return Err(DependencyError::CyclicDependency {
                    components: visiting[start..].iter().cloned().collect(),
                });
            }
            visiting.push(key.clone());
            self.check_dependencies(key, visiting)?;
            visiting.pop();
        }
        Ok(())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.providers.keys().map(ToString::to_string).collect();
        keys.sort();
        let mut scopes: Vec<String> = self.scopes.keys().map(TypeInfo::short_name).collect();
        scopes.sort();
        f.debug_struct("ContextConfig")
            .field("options", &self.options)
            .field("bindings", &keys)
            .field("scopes", &scopes)
            .finish()
    }
}
