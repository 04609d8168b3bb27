//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件构造、依赖解析与类型描述的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentProvider`] - 组件提供者接口
//! - [`ComponentResolver`] - 依赖解析器接口（上下文）
//! - [`Resolvable`] - 注入点类型到组件引用的桥接
//! - [`Lazy`] - 延迟句柄
//! - [`ComponentClass`] / [`TypeDescriptor`] - 类型描述契约

pub mod class;
pub mod descriptor;
pub mod lazy;
pub mod provider;
pub mod resolvable;
pub mod resolver;

pub use class::*;
pub use descriptor::*;
pub use lazy::*;
pub use provider::*;
pub use resolvable::*;
pub use resolver::*;

pub use di_common::{
    Annotation, AnnotationKind, AnnotationValue, ComponentKey, ComponentRef, ContainerKind,
    DependencyError, DependencyResult, IllegalComponentReason, Named, Qualifier, Singleton, TypeInfo,
};
