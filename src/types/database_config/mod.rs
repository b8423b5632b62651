use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{QuickTableError, QuickTableResult};

/// 默认忙等待超时（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// SQLite 数据库配置
///
/// 表句柄只保存这份配置，每次操作按它打开一个新连接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// 数据库文件路径
    pub path: String,
    /// 文件不存在时是否自动创建
    pub create_if_missing: bool,
    /// 数据库被锁定时的等待时间（毫秒）
    pub busy_timeout_ms: u64,
}

impl SqliteConfig {
    /// 使用默认选项创建配置：自动创建文件，忙等待5秒
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// 校验配置
    ///
    /// 每个操作都会新开连接，内存数据库在连接关闭后即丢失，因此直接拒绝
    pub fn validate(&self) -> QuickTableResult<()> {
        if self.path.trim().is_empty() {
            return Err(QuickTableError::ConfigError {
                message: crate::i18n::t("error.config_path_empty"),
            });
        }
        if self.path == ":memory:" || self.path.contains("mode=memory") {
            return Err(QuickTableError::ConfigError {
                message: crate::i18n::tf("error.config_memory_unsupported", &[("path", &self.path)]),
            });
        }
        Ok(())
    }

    /// 从 TOML 文本解析配置
    ///
    /// ```toml
    /// path = "data/app.db"
    /// create_if_missing = true
    /// busy_timeout_ms = 5000
    /// ```
    pub fn from_toml_str(text: &str) -> QuickTableResult<Self> {
        let config: SqliteConfig = toml::from_str(text).map_err(|e| QuickTableError::ConfigError {
            message: crate::i18n::tf("error.config_parse", &[("message", &e.to_string())]),
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl From<&str> for SqliteConfig {
    fn from(path: &str) -> Self {
        SqliteConfig::new(path)
    }
}

impl From<String> for SqliteConfig {
    fn from(path: String) -> Self {
        SqliteConfig::new(path)
    }
}

impl From<PathBuf> for SqliteConfig {
    fn from(path: PathBuf) -> Self {
        SqliteConfig::new(path.to_string_lossy().into_owned())
    }
}

impl From<&std::path::Path> for SqliteConfig {
    fn from(path: &std::path::Path) -> Self {
        SqliteConfig::new(path.to_string_lossy().into_owned())
    }
}
