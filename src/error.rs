//! 错误类型定义
//!
//! 所有公共操作统一返回 `QuickTableResult<T>`，错误按来源分类：
//! 模式反射、类型映射、参数校验、存储层执行以及连接/配置。
//! 错误类别前缀和消息正文都取自当前语言的翻译

use thiserror::Error;

/// quicktable 错误类型
#[derive(Error, Debug)]
pub enum QuickTableError {
    /// 反射得到的表结构不一致（例如多个主键列）
    #[error("{kind} [{table}]: {message}", kind = crate::i18n::t("error.kind.schema"))]
    SchemaError { table: String, message: String },

    /// 表不存在（反射时目录中没有任何列）
    #[error("{kind}: {table}", kind = crate::i18n::t("error.kind.table_not_exist"))]
    TableNotExistError { table: String },

    /// 无效的语义类型，或主键列不是整数类型
    #[error("{kind} [{column}]: {message}", kind = crate::i18n::t("error.kind.type"))]
    TypeError { column: String, message: String },

    /// 参数格式错误：插入数据、索引键、列选择或标识符
    #[error("{kind} [{field}]: {message}", kind = crate::i18n::t("error.kind.value"))]
    ValueError { field: String, message: String },

    /// 存储层执行或读取失败，原始 sqlx 错误保留为 source
    #[error("{message}: {source}")]
    StorageError {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// 数据库连接失败
    #[error("{kind}: {message}", kind = crate::i18n::t("error.kind.connection"))]
    ConnectionError { message: String },

    /// 配置错误
    #[error("{kind}: {message}", kind = crate::i18n::t("error.kind.config"))]
    ConfigError { message: String },
}

/// quicktable 结果类型
pub type QuickTableResult<T> = Result<T, QuickTableError>;

impl QuickTableError {
    /// 包装存储层错误，消息取自 `error.query` 翻译
    pub fn storage(sql: &str, source: sqlx::Error) -> Self {
        QuickTableError::StorageError {
            message: crate::i18n::tf("error.query", &[("sql", sql)]),
            source,
        }
    }

    /// 是否为存储层错误
    pub fn is_storage_error(&self) -> bool {
        matches!(self, QuickTableError::StorageError { .. })
    }
}

/// 快速构造常用错误
///
/// ```ignore
/// quick_error!(value, "insert", "expected 2 values, got 3")
/// ```
#[macro_export]
macro_rules! quick_error {
    (schema, $table:expr, $msg:expr) => {
        $crate::error::QuickTableError::SchemaError {
            table: $table.to_string(),
            message: $msg.to_string(),
        }
    };
    (type_error, $column:expr, $msg:expr) => {
        $crate::error::QuickTableError::TypeError {
            column: $column.to_string(),
            message: $msg.to_string(),
        }
    };
    (value, $field:expr, $msg:expr) => {
        $crate::error::QuickTableError::ValueError {
            field: $field.to_string(),
            message: $msg.to_string(),
        }
    };
    (config, $msg:expr) => {
        $crate::error::QuickTableError::ConfigError {
            message: $msg.to_string(),
        }
    };
    (connection, $msg:expr) => {
        $crate::error::QuickTableError::ConnectionError {
            message: $msg.to_string(),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_translated_prefix() {
        let err = crate::quick_error!(value, "key", "bad key");
        assert_eq!(
            err.to_string(),
            format!("{} [key]: bad key", crate::i18n::t("error.kind.value"))
        );

        let err = QuickTableError::TableNotExistError {
            table: "ghost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            format!("{}: ghost", crate::i18n::t("error.kind.table_not_exist"))
        );
    }

    #[test]
    fn test_every_prefix_is_registered() {
        for key in [
            "error.kind.schema",
            "error.kind.table_not_exist",
            "error.kind.type",
            "error.kind.value",
            "error.kind.connection",
            "error.kind.config",
        ] {
            assert_ne!(crate::i18n::t(key), key);
        }
    }
}
