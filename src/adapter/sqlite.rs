//! SQLite数据库适配器
//!
//! 使用sqlx库实现真实的SQLite数据库操作

pub(crate) mod connection;
pub(crate) mod data_conversion;
pub(crate) mod operations;
pub(crate) mod schema;
pub mod query_builder;

pub use query_builder::SqlQueryBuilder;
