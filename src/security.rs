//! 标识符安全验证工具
//!
//! 表名和调用方给出的列名会直接拼接进SQL语句，执行前必须验证，防止SQL注入。
//! 建表的列标签和目录中读到的列名以双引号引用后拼接

use crate::error::{QuickTableError, QuickTableResult};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

const MAX_IDENTIFIER_LEN: usize = 64;

const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER",
    "TABLE", "INDEX", "AND", "OR", "NOT", "NULL", "IS", "IN", "EXISTS", "BETWEEN", "LIKE",
    "REGEXP", "UNION", "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "GROUP", "BY", "HAVING",
    "ORDER", "LIMIT", "OFFSET", "DISTINCT", "AS", "ON", "PRIMARY", "KEY", "FOREIGN",
    "REFERENCES", "CASE", "WHEN", "THEN", "ELSE", "END", "IF", "CAST", "VALUES", "INTO",
    "SET", "DEFAULT", "CONSTRAINT", "UNIQUE", "CHECK", "PRAGMA", "TRANSACTION", "COMMIT",
    "ROLLBACK", "VIEW", "TRIGGER",
];

/// 标识符类别，用于错误消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Table,
    Column,
}

impl IdentifierKind {
    fn label(&self) -> &'static str {
        match self {
            IdentifierKind::Table => "table name",
            IdentifierKind::Column => "column name",
        }
    }
}

/// 验证表名
pub fn validate_table_name(name: &str) -> QuickTableResult<()> {
    validate_identifier(IdentifierKind::Table, name)
}

/// 验证列名
pub fn validate_column_name(name: &str) -> QuickTableResult<()> {
    validate_identifier(IdentifierKind::Column, name)
}

/// 验证标识符的安全性
///
/// 规则：非空，不超过64个字符，只含ASCII字母数字和下划线且不以数字开头，不是SQL关键字
pub fn validate_identifier(kind: IdentifierKind, name: &str) -> QuickTableResult<()> {
    let label = kind.label();

    if name.is_empty() {
        return Err(QuickTableError::ValueError {
            field: label.to_string(),
            message: crate::i18n::tf("error.identifier_empty", &[("kind", label)]),
        });
    }

    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(QuickTableError::ValueError {
            field: name.to_string(),
            message: crate::i18n::tf("error.identifier_too_long", &[("kind", label), ("name", name)]),
        });
    }

    if !IDENTIFIER_PATTERN.is_match(name) {
        return Err(QuickTableError::ValueError {
            field: name.to_string(),
            message: crate::i18n::tf("error.identifier_invalid", &[("kind", label), ("name", name)]),
        });
    }

    let upper_name = name.to_uppercase();
    if SQL_KEYWORDS.contains(&upper_name.as_str()) {
        return Err(QuickTableError::ValueError {
            field: name.to_string(),
            message: crate::i18n::tf("error.identifier_keyword", &[("kind", label), ("name", name)]),
        });
    }

    Ok(())
}

/// 验证建表时的列标签
///
/// 列标签在DDL中以双引号引用，因此关键字和非ASCII字符都允许；
/// 只要求非空、不超过64个字符且不含控制字符
pub fn validate_column_label(name: &str) -> QuickTableResult<()> {
    let label = IdentifierKind::Column.label();

    if name.is_empty() {
        return Err(QuickTableError::ValueError {
            field: label.to_string(),
            message: crate::i18n::tf("error.identifier_empty", &[("kind", label)]),
        });
    }

    if name.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(QuickTableError::ValueError {
            field: name.to_string(),
            message: crate::i18n::tf("error.identifier_too_long", &[("kind", label), ("name", name)]),
        });
    }

    if name.chars().any(char::is_control) {
        return Err(QuickTableError::ValueError {
            field: name.escape_default().to_string(),
            message: crate::i18n::tf(
                "error.identifier_control",
                &[("kind", label), ("name", &name.escape_default().to_string())],
            ),
        });
    }

    Ok(())
}

/// 以双引号引用标识符，内部的双引号加倍转义
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_validation() {
        // 有效列名
        assert!(validate_column_name("name").is_ok());
        assert!(validate_column_name("user_name").is_ok());
        assert!(validate_column_name("_x1").is_ok());
        assert!(validate_column_name("id").is_ok());

        // 无效列名
        assert!(validate_column_name("").is_err());
        assert!(validate_column_name("123name").is_err());
        assert!(validate_column_name("na-me").is_err());
        assert!(validate_column_name("na me").is_err());
        assert!(validate_column_name("x; DROP TABLE t").is_err());
        assert!(validate_column_name("select").is_err());
        assert!(validate_column_name("WHERE").is_err());
    }

    #[test]
    fn test_table_validation() {
        assert!(validate_table_name("users").is_ok());
        assert!(validate_table_name(&"t".repeat(64)).is_ok());
        assert!(validate_table_name(&"t".repeat(65)).is_err());
        assert!(validate_table_name("table").is_err());
        assert!(validate_table_name("users'").is_err());
    }

    #[test]
    fn test_column_label_validation() {
        assert!(validate_column_label("key").is_ok());
        assert!(validate_column_label("名称").is_ok());
        assert!(validate_column_label("first name").is_ok());
        assert!(validate_column_label(&"名".repeat(64)).is_ok());
        assert!(validate_column_label(&"名".repeat(65)).is_err());
        assert!(validate_column_label("").is_err());
        assert!(validate_column_label("a\nb").is_err());
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("key"), "\"key\"");
        assert_eq!(quote_identifier("名称"), "\"名称\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_error_kind() {
        let err = validate_table_name("drop").unwrap_err();
        assert!(matches!(err, QuickTableError::ValueError { .. }));
    }
}
