//! # 配置管理模块
//!
//! 提供SQLite配置的构建器和便捷函数

pub mod builders;
pub mod convenience;

pub use builders::SqliteConfigBuilder;
pub use convenience::sqlite_config;
