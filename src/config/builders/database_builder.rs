//! # 数据库配置构建器模块
//!
//! 提供SQLite配置的构建器实现，支持链式调用和严格验证

use crate::error::QuickTableResult;
use crate::types::SqliteConfig;
use rat_logger::info;

/// SQLite配置构建器
///
/// 所有配置项必须显式设置，未设置的项在 `build` 时报错
#[derive(Debug)]
pub struct SqliteConfigBuilder {
    path: Option<String>,
    create_if_missing: Option<bool>,
    busy_timeout_ms: Option<u64>,
}

impl SqliteConfig {
    /// 创建SQLite配置构建器
    pub fn builder() -> SqliteConfigBuilder {
        SqliteConfigBuilder::new()
    }
}

impl SqliteConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            path: None,
            create_if_missing: None,
            busy_timeout_ms: None,
        }
    }

    /// 设置数据库文件路径
    ///
    /// # 参数
    ///
    /// * `path` - 数据库文件路径
    pub fn path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 设置文件不存在时是否自动创建
    pub fn create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = Some(create_if_missing);
        self
    }

    /// 设置忙等待超时（毫秒）
    pub fn busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = Some(busy_timeout_ms);
        self
    }

    /// 构建SQLite配置
    ///
    /// # 错误
    ///
    /// 任何配置项未设置，或路径无效时返回 ConfigError
    pub fn build(self) -> QuickTableResult<SqliteConfig> {
        let path = self.path.ok_or_else(|| {
            crate::quick_error!(config, crate::i18n::tf("error.config_field_missing", &[("field", "path")]))
        })?;

        let create_if_missing = self.create_if_missing.ok_or_else(|| {
            crate::quick_error!(
                config,
                crate::i18n::tf("error.config_field_missing", &[("field", "create_if_missing")])
            )
        })?;

        let busy_timeout_ms = self.busy_timeout_ms.ok_or_else(|| {
            crate::quick_error!(
                config,
                crate::i18n::tf("error.config_field_missing", &[("field", "busy_timeout_ms")])
            )
        })?;

        let config = SqliteConfig {
            path,
            create_if_missing,
            busy_timeout_ms,
        };
        config.validate()?;

        info!("创建SQLite配置: 路径={}, 自动创建={}", config.path, config.create_if_missing);

        Ok(config)
    }
}

impl Default for SqliteConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuickTableError;

    #[test]
    fn test_builder_requires_every_field() {
        let err = SqliteConfig::builder().path("a.db").build().unwrap_err();
        assert!(matches!(err, QuickTableError::ConfigError { .. }));
    }

    #[test]
    fn test_builder_builds() {
        let config = SqliteConfig::builder()
            .path("a.db")
            .create_if_missing(false)
            .busy_timeout_ms(250)
            .build()
            .unwrap();
        assert_eq!(config.path, "a.db");
        assert!(!config.create_if_missing);
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn test_builder_rejects_memory_path() {
        let err = SqliteConfig::builder()
            .path(":memory:")
            .create_if_missing(true)
            .busy_timeout_ms(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, QuickTableError::ConfigError { .. }));
    }
}
