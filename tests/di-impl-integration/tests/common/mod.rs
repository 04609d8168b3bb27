//! 集成测试共享的组件与声明工具
#![allow(dead_code)]

use di_abstractions::{
    implements, Annotation, AnnotationKind, AnnotationValue, ComponentClass, Constructor, Field,
    Lazy, Method, Parameter, Resolvable,
};
use std::sync::Arc;

pub trait TestComponent: Send + Sync {
    fn dependency(&self) -> Option<Arc<dyn Dependency>> {
        None
    }
}

pub trait Dependency: Send + Sync {}

pub trait AnotherDependency: Send + Sync {}

/// 自定义限定符
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skywalker;

impl Annotation for Skywalker {
    const KIND: AnnotationKind = AnnotationKind::Qualifier;
}

/// 自定义作用域
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pooled;

impl Annotation for Pooled {
    const KIND: AnnotationKind = AnnotationKind::Scope;
}

/// 既不是限定符也不是作用域
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Audited;

impl Annotation for Audited {
    const KIND: AnnotationKind = AnnotationKind::Marker;
}

/// 注入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    Constructor,
    Field,
    Method,
}

pub const ALL_VIAS: [Via; 3] = [Via::Constructor, Via::Field, Via::Method];

/// 声明一个通过 `via` 注入单个依赖的组件类
pub fn needs<I, D>(
    name: &'static str,
    via: Via,
    qualifier: Option<AnnotationValue>,
    make: fn() -> I,
    set: fn(&mut I, D),
) -> ComponentClass<I>
where
    I: Send + Sync + 'static,
    D: Resolvable,
{
    let mut parameter = Parameter::of::<D>();
    if let Some(qualifier) = qualifier.clone() {
        parameter = parameter.with_annotation(qualifier);
    }

    match via {
        Via::Constructor => ComponentClass::new(name).constructor(
            Constructor::new(move |args| {
                let mut component = make();
                set(&mut component, args.take::<D>()?);
                Ok(component)
            })
            .with_param(parameter)
            .injected(),
        ),
        Via::Field => {
            let mut field = Field::new("dependency", set).injected();
            if let Some(qualifier) = qualifier {
                field = field.with_annotation(qualifier);
            }
            ComponentClass::new(name)
                .constructor(Constructor::new(move |_| Ok(make())))
                .field(field)
        }
        Via::Method => ComponentClass::new(name)
            .constructor(Constructor::new(move |_| Ok(make())))
            .method(
                Method::new("install", move |component: &mut I, args| {
                    set(component, args.take::<D>()?);
                    Ok(())
                })
                .with_param(parameter)
                .injected(),
            ),
    }
}

/// 没有依赖的组件类
pub fn plain<I: Send + Sync + 'static>(name: &'static str, make: fn() -> I) -> ComponentClass<I> {
    ComponentClass::new(name).constructor(Constructor::new(move |_| Ok(make())))
}

#[derive(Default)]
pub struct SimpleDependency;

impl Dependency for SimpleDependency {}

implements!(SimpleDependency: dyn Dependency);

/// 依赖 `Dependency` 的组件
#[derive(Default)]
pub struct DependentComponent {
    pub dependency: Option<Arc<dyn Dependency>>,
}

impl TestComponent for DependentComponent {
    fn dependency(&self) -> Option<Arc<dyn Dependency>> {
        self.dependency.clone()
    }
}

implements!(DependentComponent: dyn TestComponent);

impl DependentComponent {
    pub fn set(&mut self, dependency: Arc<dyn Dependency>) {
        self.dependency = Some(dependency);
    }
}

/// 依赖 `TestComponent` 的依赖
#[derive(Default)]
pub struct ComponentDependency {
    pub component: Option<Arc<dyn TestComponent>>,
}

impl Dependency for ComponentDependency {}

implements!(ComponentDependency: dyn Dependency);

impl ComponentDependency {
    pub fn set(&mut self, component: Arc<dyn TestComponent>) {
        self.component = Some(component);
    }
}

/// 依赖 `AnotherDependency` 的依赖
#[derive(Default)]
pub struct ChainedDependency {
    pub another: Option<Arc<dyn AnotherDependency>>,
}

impl Dependency for ChainedDependency {}

implements!(ChainedDependency: dyn Dependency);

impl ChainedDependency {
    pub fn set(&mut self, another: Arc<dyn AnotherDependency>) {
        self.another = Some(another);
    }
}

/// 依赖 `TestComponent` 的另一个依赖
#[derive(Default)]
pub struct ClosingDependency {
    pub component: Option<Arc<dyn TestComponent>>,
}

impl AnotherDependency for ClosingDependency {}

implements!(ClosingDependency: dyn AnotherDependency);

impl ClosingDependency {
    pub fn set(&mut self, component: Arc<dyn TestComponent>) {
        self.component = Some(component);
    }
}

/// 通过延迟句柄依赖 `TestComponent`
#[derive(Default)]
pub struct LazyComponentDependency {
    pub component: Option<Lazy<dyn TestComponent>>,
}

impl Dependency for LazyComponentDependency {}

implements!(LazyComponentDependency: dyn Dependency);

impl LazyComponentDependency {
    pub fn set(&mut self, component: Lazy<dyn TestComponent>) {
        self.component = Some(component);
    }
}

/// 通过延迟句柄依赖 `Dependency` 的组件
#[derive(Default)]
pub struct LazyDependentComponent {
    pub dependency: Option<Lazy<dyn Dependency>>,
}

impl TestComponent for LazyDependentComponent {
    fn dependency(&self) -> Option<Arc<dyn Dependency>> {
        self.dependency.as_ref().and_then(|lazy| lazy.get().ok())
    }
}

implements!(LazyDependentComponent: dyn TestComponent);

impl LazyDependentComponent {
    pub fn set(&mut self, dependency: Lazy<dyn Dependency>) {
        self.dependency = Some(dependency);
    }
}

/// 实例地址，用于判断两个解析结果是否为同一实例
pub fn address<T: ?Sized>(instance: &Arc<T>) -> usize {
    Arc::as_ptr(instance).cast::<()>() as usize
}
