//! # Component Macros
//!
//! 这个 crate 提供了在编译期生成组件类声明的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 为结构体生成 `di_abstractions::Injectable` 实现
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Injectable;
//! use di_abstractions::Lazy;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! #[component(singleton)]
//! pub struct OrderService {
//!     #[named("primary")]
//!     repository: Arc<dyn OrderRepository>,
//!     audit: Lazy<dyn AuditLog>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 组件类派生宏
///
/// 生成的组件类只有一个注入构造器，按声明顺序把每个字段作为参数注入；
/// 没有字段的结构体使用无参构造器。
///
/// # 结构体属性
///
/// - `#[component(singleton)]` - 声明单例作用域
/// - `#[component(scope = Expr)]` - 声明自定义作用域标记
/// - `#[component(name = "custom_name")]` - 自定义组件名称
///
/// # 字段属性
///
/// - `#[named("x")]` - 名称限定符
/// - `#[qualifier(Expr)]` - 任意限定符注解
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// #[component(scope = Pooled)]
/// pub struct Worker {
///     #[qualifier(Region::West)]
///     queue: Arc<dyn Queue>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(component, named, qualifier))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
}
