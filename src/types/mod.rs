//! 公共类型模块

pub mod column_type;
pub mod data_value;
pub mod database_config;

pub use column_type::ColumnType;
pub use data_value::DataValue;
pub use database_config::{SqliteConfig, DEFAULT_BUSY_TIMEOUT_MS};
