use crate::error::{QuickTableError, QuickTableResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 列的语义类型
///
/// 与SQLite的存储类别一一对应，建表时映射为 NULL/INTEGER/REAL/TEXT/BLOB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// 空类型
    Null,
    /// 整数
    Integer,
    /// 浮点数
    Real,
    /// 文本
    Text,
    /// 二进制
    Blob,
}

impl ColumnType {
    /// 对应的SQL类型关键字
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Null => "NULL",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnType::Integer)
    }

    /// 从类型名解析，未知类型返回 TypeError
    pub fn parse(name: &str) -> QuickTableResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "null" | "none" => Ok(ColumnType::Null),
            "int" | "integer" | "i64" => Ok(ColumnType::Integer),
            "real" | "float" | "double" | "f64" => Ok(ColumnType::Real),
            "text" | "str" | "string" => Ok(ColumnType::Text),
            "blob" | "bytes" | "binary" => Ok(ColumnType::Blob),
            _ => Err(QuickTableError::TypeError {
                column: String::new(),
                message: crate::i18n::tf("error.invalid_column_type", &[("type_name", name)]),
            }),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ColumnType {
    type Err = QuickTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("int".parse::<ColumnType>().unwrap(), ColumnType::Integer);
        assert_eq!("FLOAT".parse::<ColumnType>().unwrap(), ColumnType::Real);
        assert_eq!("str".parse::<ColumnType>().unwrap(), ColumnType::Text);
        assert_eq!("bytes".parse::<ColumnType>().unwrap(), ColumnType::Blob);
        assert_eq!("None".parse::<ColumnType>().unwrap(), ColumnType::Null);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "datetime".parse::<ColumnType>().unwrap_err();
        assert!(matches!(err, QuickTableError::TypeError { .. }));
    }

    #[test]
    fn test_sql_tokens() {
        assert_eq!(ColumnType::Null.as_sql(), "NULL");
        assert_eq!(ColumnType::Blob.to_string(), "BLOB");
    }
}
