//! quicktable - SQLite单表访问库
//!
//! 打开已存在的表时通过目录反射其结构，提供建表、删表、插入、
//! 条件查询和按主键/列的索引访问，查询结果以 `DataFrame` 返回

pub mod error;
pub mod types;
pub mod adapter;
pub mod config;
pub mod table;
pub mod frame;
pub mod security;
pub mod i18n;

// 重新导出常用类型和函数
pub use error::{QuickTableError, QuickTableResult};
pub use types::{ColumnType, DataValue, SqliteConfig};
pub use config::{sqlite_config, SqliteConfigBuilder};
pub use table::{
    drop_table, table_exists, ColumnInfo, ColumnSelection, ColumnSpec, InsertRow, Table,
    TableKey, TableSchema, WhereClause,
};
pub use frame::DataFrame;

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化quicktable库
///
/// 注册多语言错误消息并按 `RAT_LANG` 选择语言。
///
/// 注意：日志系统由调用者自行初始化，本库不初始化日志
pub fn init() {
    i18n::ErrorMessageI18n::init();
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
