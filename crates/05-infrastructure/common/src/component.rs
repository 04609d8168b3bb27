//! 组件标识
//!
//! [`ComponentKey`] 标识一个绑定，[`ComponentRef`] 是一次解析请求。

use crate::annotation::AnnotationValue;
use crate::metadata::TypeInfo;
use std::fmt;

/// 限定符
///
/// 没有限定符时使用显式的 [`Qualifier::Default`]。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// 默认（无限定符）
    #[default]
    Default,
    /// 由限定符注解标注
    Annotated(AnnotationValue),
}

impl Qualifier {
    /// 使用注解创建限定符
    pub fn annotated(annotation: impl Into<AnnotationValue>) -> Self {
        Self::Annotated(annotation.into())
    }

    /// 是否为默认限定符
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// 获取注解值
    pub fn annotation(&self) -> Option<&AnnotationValue> {
        match self {
            Self::Default => None,
            Self::Annotated(annotation) => Some(annotation),
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => Ok(()),
            Self::Annotated(annotation) => write!(f, "{annotation} "),
        }
    }
}

/// 组件键：类型加限定符
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    component: TypeInfo,
    qualifier: Qualifier,
}

impl ComponentKey {
    /// 创建组件键
    pub fn new(component: TypeInfo, qualifier: Qualifier) -> Self {
        Self {
            component,
            qualifier,
        }
    }

    /// 无限定符的组件键
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), Qualifier::Default)
    }

    /// 带限定符的组件键
    pub fn qualified<T: ?Sized + 'static>(qualifier: impl Into<AnnotationValue>) -> Self {
        Self::new(TypeInfo::of::<T>(), Qualifier::annotated(qualifier))
    }

    /// 组件类型
    pub fn component(&self) -> &TypeInfo {
        &self.component
    }

    /// 限定符
    pub fn qualifier(&self) -> &Qualifier {
        &self.qualifier
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.qualifier, self.component)
    }
}

/// 容器类型
///
/// 注入点声明为某种包装（如延迟句柄）而不是组件本身时使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// 延迟句柄，调用时才解析
    Lazy,
    /// 容器不支持的包装类型，解析结果总是为空
    Unsupported(TypeInfo),
}

/// 组件引用：一次解析请求
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    key: ComponentKey,
    container: Option<ContainerKind>,
}

impl ComponentRef {
    /// 创建组件引用
    pub fn new(key: ComponentKey, container: Option<ContainerKind>) -> Self {
        Self { key, container }
    }

    /// 直接引用组件
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(ComponentKey::of::<T>(), None)
    }

    /// 以延迟句柄引用组件
    pub fn lazy<T: ?Sized + 'static>(qualifier: Qualifier) -> Self {
        Self::new(
            ComponentKey::new(TypeInfo::of::<T>(), qualifier),
            Some(ContainerKind::Lazy),
        )
    }

    /// 组件键
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// 容器类型
    pub fn container(&self) -> Option<ContainerKind> {
        self.container
    }

    /// 是否为容器引用
    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    /// 是否为延迟句柄引用
    pub fn is_lazy(&self) -> bool {
        self.container == Some(ContainerKind::Lazy)
    }
}

impl From<ComponentKey> for ComponentRef {
    fn from(key: ComponentKey) -> Self {
        Self::new(key, None)
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.container {
            None => write!(f, "{}", self.key),
            Some(ContainerKind::Lazy) => write!(f, "Lazy<{}>", self.key),
            Some(ContainerKind::Unsupported(container)) => {
                write!(f, "{}[{}]", container.short_name(), self.key)
            }
        }
    }
}
