//! 数据库适配器模块
//!
//! 封装对存储层的全部访问：连接、SQL构建、执行和行转换

pub mod sqlite;

pub use sqlite::SqlQueryBuilder;
