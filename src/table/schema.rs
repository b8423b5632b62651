//! 表模式定义
//!
//! `ColumnSpec` 描述建表时的列，`ColumnInfo` 和 `TableSchema` 描述从目录反射得到的结构

use crate::error::{QuickTableError, QuickTableResult};
use crate::types::ColumnType;
use serde::{Deserialize, Serialize};

/// 自增主键后缀
pub const PRIMARY_KEY_SUFFIX: &str = "PRIMARY KEY AUTOINCREMENT";

/// 建表用的列定义：列名 + 语义类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new<S: Into<String>>(label: S, column_type: ColumnType) -> Self {
        Self {
            label: label.into(),
            column_type,
        }
    }

    /// 列名 + 类型名字符串，类型名无效时返回 TypeError
    pub fn parse<S: Into<String>>(label: S, type_name: &str) -> QuickTableResult<Self> {
        let label = label.into();
        let column_type = ColumnType::parse(type_name).map_err(|e| match e {
            QuickTableError::TypeError { message, .. } => QuickTableError::TypeError {
                column: label.clone(),
                message,
            },
            other => other,
        })?;
        Ok(Self { label, column_type })
    }
}

impl<S: Into<String>> From<(S, ColumnType)> for ColumnSpec {
    fn from((label, column_type): (S, ColumnType)) -> Self {
        ColumnSpec::new(label, column_type)
    }
}

/// 目录中的一列（PRAGMA table_info 的一行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// 列序号
    pub cid: i64,
    /// 列名
    pub name: String,
    /// 声明类型，保持存储层原样，可能为空字符串
    pub declared_type: String,
    /// 是否 NOT NULL
    pub not_null: bool,
    /// 默认值表达式
    pub default_value: Option<String>,
    /// 主键标记
    pub primary_key: bool,
}

/// 反射得到的表结构，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnInfo>,
    primary_key: Option<String>,
    display_form: String,
}

impl TableSchema {
    /// 根据目录列信息推导主键和展示形式
    ///
    /// 没有主键标记时主键为 None；多于一个标记时返回 SchemaError
    pub fn from_columns(name: &str, columns: Vec<ColumnInfo>) -> QuickTableResult<Self> {
        let marked: Vec<&ColumnInfo> = columns.iter().filter(|c| c.primary_key).collect();

        let primary_key = match marked.as_slice() {
            [] => None,
            [only] => Some(only.name.clone()),
            many => {
                let names = many
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(crate::quick_error!(
                    schema,
                    name,
                    crate::i18n::tf("error.multiple_primary_keys", &[("columns", &names)])
                ));
            }
        };

        let entries: Vec<String> = columns
            .iter()
            .map(|c| {
                let mut entry = format!("{} {}", c.name, c.declared_type);
                if primary_key.as_deref() == Some(c.name.as_str()) {
                    entry.push(' ');
                    entry.push_str(PRIMARY_KEY_SUFFIX);
                }
                entry
            })
            .collect();
        let display_form = format!("{}({})", name, entries.join(", "));

        Ok(Self {
            name: name.to_string(),
            columns,
            primary_key,
            display_form,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    /// 按物理顺序的列名
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    pub fn display_form(&self) -> &str {
        &self.display_form
    }

    pub fn declared_type(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.declared_type.as_str())
    }

    /// 按SQLite规则（ASCII不区分大小写）查找列，返回目录中的列名
    pub fn resolve_column(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(column))
            .map(|c| c.name.as_str())
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }

    /// 插入时需要提供值的列（排除主键）
    pub fn value_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.primary_key.as_deref() != Some(c.name.as_str()))
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(cid: i64, name: &str, declared_type: &str, pk: bool) -> ColumnInfo {
        ColumnInfo {
            cid,
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            not_null: false,
            default_value: None,
            primary_key: pk,
        }
    }

    #[test]
    fn test_schema_with_primary_key() {
        let schema = TableSchema::from_columns(
            "points",
            vec![
                column(0, "id", "INTEGER", true),
                column(1, "x", "REAL", false),
                column(2, "label", "TEXT", false),
            ],
        )
        .unwrap();

        assert_eq!(schema.primary_key(), Some("id"));
        assert_eq!(schema.column_names(), vec!["id", "x", "label"]);
        assert_eq!(schema.value_columns(), vec!["x", "label"]);
        assert_eq!(
            schema.display_form(),
            "points(id INTEGER PRIMARY KEY AUTOINCREMENT, x REAL, label TEXT)"
        );
    }

    #[test]
    fn test_schema_without_primary_key() {
        let schema =
            TableSchema::from_columns("t", vec![column(0, "a", "", false), column(1, "b", "BLOB", false)])
                .unwrap();
        assert_eq!(schema.primary_key(), None);
        assert_eq!(schema.value_columns(), vec!["a", "b"]);
        assert_eq!(schema.display_form(), "t(a , b BLOB)");
    }

    #[test]
    fn test_resolve_column_ignores_ascii_case() {
        let schema = TableSchema::from_columns(
            "t",
            vec![column(0, "id", "INTEGER", true), column(1, "名称", "TEXT", false)],
        )
        .unwrap();
        assert_eq!(schema.resolve_column("ID"), Some("id"));
        assert_eq!(schema.resolve_column("名称"), Some("名称"));
        assert_eq!(schema.resolve_column("missing"), None);
    }

    #[test]
    fn test_schema_rejects_multiple_primary_keys() {
        let err = TableSchema::from_columns(
            "t",
            vec![column(0, "a", "INTEGER", true), column(1, "b", "INTEGER", true)],
        )
        .unwrap_err();
        assert!(matches!(err, QuickTableError::SchemaError { .. }));
    }

    #[test]
    fn test_column_spec_parse() {
        let spec = ColumnSpec::parse("x", "float").unwrap();
        assert_eq!(spec, ColumnSpec::new("x", ColumnType::Real));

        match ColumnSpec::parse("when", "datetime").unwrap_err() {
            QuickTableError::TypeError { column, .. } => assert_eq!(column, "when"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
