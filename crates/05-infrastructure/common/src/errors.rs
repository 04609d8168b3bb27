//! 错误类型定义

use crate::component::ComponentKey;
use std::collections::HashSet;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },

    #[error("日志初始化失败: {message}")]
    LoggingInitFailed { message: String },
}

/// 组件声明不合法的原因
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalComponentReason {
    #[error("抽象类型不能被实例化")]
    AbstractComponent,

    #[error("存在多个注入构造器")]
    AmbiguousConstructor,

    #[error("既没有注入构造器也没有无参构造器")]
    NoUsableConstructor,

    #[error("注入字段不可变")]
    ImmutableField,

    #[error("注入方法声明了类型参数")]
    GenericMethod,

    #[error("注入点标注了多个限定符")]
    MultipleQualifiers,

    #[error("标注了多个作用域")]
    MultipleScopes,

    #[error("作用域未注册")]
    UnknownScope,

    #[error("注解不是限定符")]
    NotAQualifier,

    #[error("注解既不是限定符也不是作用域")]
    NotAScopeOrQualifier,
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件声明不合法: {component}, 原因: {reason}")]
    IllegalComponent {
        component: String,
        reason: IllegalComponentReason,
    },

    #[error("依赖未找到: {component} 需要 {dependency}")]
    DependencyNotFound {
        component: ComponentKey,
        dependency: ComponentKey,
    },

    #[error("循环依赖检测到: {}", describe_keys(.components))]
    CyclicDependency { components: HashSet<ComponentKey> },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("组件未绑定: {key}")]
    ComponentNotBound { key: ComponentKey },

    #[error("类型不匹配: 期望 {expected}")]
    TypeMismatch { expected: String },

    #[error("上下文已释放, 无法解析延迟句柄: {key}")]
    ContextDropped { key: ComponentKey },

    #[error("组件重复绑定: {key}")]
    DuplicateBinding { key: ComponentKey },
}

impl DependencyError {
    /// 创建组件声明不合法错误
    pub fn illegal_component(component: impl Into<String>, reason: IllegalComponentReason) -> Self {
        Self::IllegalComponent {
            component: component.into(),
            reason,
        }
    }

    /// 不合法原因（仅 `IllegalComponent` 有）
    pub fn illegal_reason(&self) -> Option<IllegalComponentReason> {
        match self {
            Self::IllegalComponent { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

fn describe_keys(keys: &HashSet<ComponentKey>) -> String {
    let mut names: Vec<String> = keys.iter().map(ToString::to_string).collect();
    names.sort();
    names.join(", ")
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
