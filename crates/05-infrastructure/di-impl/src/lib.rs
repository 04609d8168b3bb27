//! # 依赖注入具体实现
//!
//! 提供绑定注册表、依赖图校验、作用域装饰器和上下文实现
//!
//! ## 核心类型
//!
//! - [`ContextConfig`] - 绑定注册表，`build` 时校验依赖图
//! - [`Context`] - 只读的组件解析器
//! - [`InjectionProvider`] / [`InstanceProvider`] - 组件提供者
//! - [`SingletonProvider`] / [`PooledProvider`] - 作用域装饰器

pub mod context;
pub mod context_config;
pub mod providers;
pub mod scope;

pub use context::Context;
pub use context_config::ContextConfig;
pub use providers::{InjectionProvider, InstanceProvider};
pub use scope::{PooledProvider, SingletonProvider};
