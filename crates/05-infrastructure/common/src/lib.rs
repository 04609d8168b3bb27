//! # DI Common
//!
//! 这个 crate 提供了依赖注入容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 类型标识
//! - [`Annotation`] - 注解模型（限定符、作用域标记）
//! - [`ComponentKey`] / [`ComponentRef`] - 绑定键与解析请求
//! - [`DependencyError`] - 依赖注入错误分类
//! - [`ContainerOptions`] - 容器配置
//!
//! ## 设计原则
//!
//! - "无限定符" 是显式的 [`Qualifier::Default`]，而不是散落各处的空值判断
//! - 注解按值比较：同类型、同载荷即相等

pub mod annotation;
pub mod component;
pub mod configuration;
pub mod errors;
pub mod logging;
pub mod metadata;

pub use annotation::*;
pub use component::*;
pub use configuration::*;
pub use errors::*;
pub use logging::*;
pub use metadata::*;
