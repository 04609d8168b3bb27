//! 注解模型
//!
//! 注解是附加在组件或注入点上的标记值。按用途分为限定符、作用域标记和普通标记；
//! 比较语义是值相等：同一注解类型、载荷相等即视为相同，与实例无关。

use crate::metadata::TypeInfo;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 注解类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// 限定符 - 区分同一类型的多个绑定
    Qualifier,
    /// 作用域标记 - 选择实例生命周期策略
    Scope,
    /// 普通标记 - 不被容器识别
    Marker,
}

/// 注解 trait
///
/// 注解类型通过关联常量声明自己的类别。
///
/// # 示例
///
/// ```rust
/// use di_common::{Annotation, AnnotationKind};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Primary;
///
/// impl Annotation for Primary {
///     const KIND: AnnotationKind = AnnotationKind::Qualifier;
/// }
/// ```
pub trait Annotation: fmt::Debug + Eq + Hash + Send + Sync + 'static {
    /// 注解类别
    const KIND: AnnotationKind;
}

trait DynAnnotation: fmt::Debug + Send + Sync {
    fn kind(&self) -> AnnotationKind;
    fn type_info(&self) -> TypeInfo;
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynAnnotation) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<A: Annotation> DynAnnotation for A {
    fn kind(&self) -> AnnotationKind {
        A::KIND
    }

    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<A>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynAnnotation) -> bool {
        other
            .as_any()
            .downcast_ref::<A>()
            .map_or(false, |other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeInfo::of::<A>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// 类型擦除后的注解值
#[derive(Clone)]
pub struct AnnotationValue(Arc<dyn DynAnnotation>);

impl AnnotationValue {
    /// 包装注解
    pub fn new<A: Annotation>(annotation: A) -> Self {
        Self(Arc::new(annotation))
    }

    /// 注解类别
    pub fn kind(&self) -> AnnotationKind {
        self.0.kind()
    }

    /// 注解类型
    pub fn type_info(&self) -> TypeInfo {
        self.0.type_info()
    }

    /// 是否为限定符
    pub fn is_qualifier(&self) -> bool {
        self.kind() == AnnotationKind::Qualifier
    }

    /// 是否为作用域标记
    pub fn is_scope(&self) -> bool {
        self.kind() == AnnotationKind::Scope
    }

    /// 是否为指定类型的注解
    pub fn is<A: Annotation>(&self) -> bool {
        self.0.as_any().is::<A>()
    }

    /// 获取具体注解
    pub fn downcast_ref<A: Annotation>(&self) -> Option<&A> {
        self.0.as_any().downcast_ref::<A>()
    }
}

impl<A: Annotation> From<A> for AnnotationValue {
    fn from(annotation: A) -> Self {
        Self::new(annotation)
    }
}

impl PartialEq for AnnotationValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl Eq for AnnotationValue {}

impl Hash for AnnotationValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:?}", self.0)
    }
}

/// 名称限定符
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Named(String);

impl Named {
    /// 创建名称限定符
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 名称
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Annotation for Named {
    const KIND: AnnotationKind = AnnotationKind::Qualifier;
}

/// 单例作用域标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Singleton;

impl Annotation for Singleton {
    const KIND: AnnotationKind = AnnotationKind::Scope;
}
