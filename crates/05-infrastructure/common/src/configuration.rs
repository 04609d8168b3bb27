//! 容器配置
//!
//! 支持从 TOML 文件与 `DI__` 前缀的环境变量加载

use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DI";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// 是否允许重复绑定同一个组件键（后绑定覆盖先绑定）
    pub allow_override: bool,
    /// 池化作用域的默认容量
    pub pool_capacity: usize,
    /// 是否记录每次解析
    pub trace_resolution: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            allow_override: true,
            pool_capacity: 2,
            trace_resolution: false,
        }
    }
}

impl ContainerOptions {
    /// 加载配置
    ///
    /// 先读取可选的配置文件，再用环境变量（如 `DI__POOL_CAPACITY=4`）覆盖。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载容器配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let options: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        options.validate()?;
        Ok(options)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pool_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "pool_capacity 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}
