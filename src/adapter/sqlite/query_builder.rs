//! SQL语句构建模块
//!
//! 只负责拼接SQL文本。表名在这里做安全验证，建表列标签验证后以双引号引用；
//! 查询列由调用方解析为可直接拼接的SQL片段

use crate::error::QuickTableResult;
use crate::security::{quote_identifier, validate_column_label, validate_table_name};
use crate::table::schema::{ColumnSpec, PRIMARY_KEY_SUFFIX};
use std::collections::HashSet;

/// SQLite语句构建器，绑定到单张表
#[derive(Debug, Clone, Copy)]
pub struct SqlQueryBuilder<'a> {
    table: &'a str,
}

impl<'a> SqlQueryBuilder<'a> {
    /// 创建构建器，表名不合法时返回 ValueError
    pub fn new(table: &'a str) -> QuickTableResult<Self> {
        validate_table_name(table)?;
        Ok(Self { table })
    }

    /// 目录查询
    pub fn table_info(&self) -> String {
        format!("PRAGMA table_info('{}')", self.table)
    }

    /// 表是否存在的查询，表名作为参数绑定
    pub fn table_exists() -> &'static str {
        "SELECT name FROM sqlite_master WHERE type='table' AND name=?"
    }

    /// 构建 CREATE TABLE 语句
    ///
    /// 所有校验都在拼接前完成：列为空、列名非法或重复（SQLite列名不区分ASCII大小写）、
    /// 主键不在列中返回 ValueError，主键不是整数类型返回 TypeError
    pub fn create_table(
        &self,
        specs: &[ColumnSpec],
        primary_key: Option<&str>,
    ) -> QuickTableResult<String> {
        if specs.is_empty() {
            return Err(crate::quick_error!(value, self.table, crate::i18n::t("error.table_no_columns")));
        }

        let mut seen = HashSet::new();
        for spec in specs {
            validate_column_label(&spec.label)?;
            if !seen.insert(spec.label.to_ascii_lowercase()) {
                return Err(crate::quick_error!(
                    value,
                    spec.label,
                    crate::i18n::tf("error.column_name_duplicate", &[("name", &spec.label)])
                ));
            }
        }

        if let Some(pk) = primary_key {
            if !specs.iter().any(|spec| spec.label == pk) {
                return Err(crate::quick_error!(
                    value,
                    pk,
                    crate::i18n::tf("error.primary_key_missing", &[("column", pk)])
                ));
            }
        }

        let mut clauses = Vec::with_capacity(specs.len());
        for spec in specs {
            let sql_type = spec.column_type.as_sql();
            let mut clause = format!("{} {}", quote_identifier(&spec.label), sql_type);

            if primary_key == Some(spec.label.as_str()) {
                if !spec.column_type.is_integer() {
                    return Err(crate::quick_error!(
                        type_error,
                        spec.label,
                        crate::i18n::tf(
                            "error.primary_key_type",
                            &[("column", &spec.label), ("type_name", sql_type)],
                        )
                    ));
                }
                clause.push(' ');
                clause.push_str(PRIMARY_KEY_SUFFIX);
            }

            clauses.push(clause);
        }

        Ok(format!("CREATE TABLE {}({})", self.table, clauses.join(", ")))
    }

    pub fn drop_table(&self) -> String {
        format!("DROP TABLE {}", self.table)
    }

    /// 构建插入模板：非主键列使用 `?`，主键位置写入字面量 NULL 交给自增机制
    pub fn insert_template(&self, columns: &[&str], primary_key: Option<&str>) -> String {
        let placeholders: Vec<&str> = columns
            .iter()
            .map(|c| if Some(*c) == primary_key { "NULL" } else { "?" })
            .collect();
        format!("INSERT INTO {} VALUES ({})", self.table, placeholders.join(", "))
    }

    /// 构建查询语句，列片段和条件模板都原样拼接
    ///
    /// 列片段由 `Table::select` 生成：目录中的列已引用，其他列名已验证
    pub fn select(&self, columns: &[String], condition: Option<&str>) -> String {
        let mut sql = format!("SELECT {} FROM {}", columns.join(","), self.table);
        if let Some(condition) = condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuickTableError;
    use crate::types::ColumnType;

    fn specs() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", ColumnType::Integer),
            ColumnSpec::new("x", ColumnType::Real),
            ColumnSpec::new("label", ColumnType::Text),
            ColumnSpec::new("payload", ColumnType::Blob),
            ColumnSpec::new("nothing", ColumnType::Null),
        ]
    }

    #[test]
    fn test_create_table_sql() {
        let builder = SqlQueryBuilder::new("points").unwrap();
        let sql = builder.create_table(&specs(), Some("id")).unwrap();
        assert_eq!(
            sql,
            r#"CREATE TABLE points("id" INTEGER PRIMARY KEY AUTOINCREMENT, "x" REAL, "label" TEXT, "payload" BLOB, "nothing" NULL)"#
        );

        let sql = builder.create_table(&specs()[1..3], None).unwrap();
        assert_eq!(sql, r#"CREATE TABLE points("x" REAL, "label" TEXT)"#);
    }

    #[test]
    fn test_create_table_rejects_non_integer_primary_key() {
        let builder = SqlQueryBuilder::new("points").unwrap();
        let err = builder.create_table(&specs(), Some("label")).unwrap_err();
        assert!(matches!(err, QuickTableError::TypeError { .. }));
    }

    #[test]
    fn test_create_table_rejects_bad_definitions() {
        let builder = SqlQueryBuilder::new("points").unwrap();

        let err = builder.create_table(&[], None).unwrap_err();
        assert!(matches!(err, QuickTableError::ValueError { .. }));

        let duplicated = vec![
            ColumnSpec::new("x", ColumnType::Real),
            ColumnSpec::new("x", ColumnType::Text),
        ];
        let err = builder.create_table(&duplicated, None).unwrap_err();
        assert!(matches!(err, QuickTableError::ValueError { .. }));

        let err = builder.create_table(&specs(), Some("missing")).unwrap_err();
        assert!(matches!(err, QuickTableError::ValueError { .. }));

        let case_duplicated = vec![
            ColumnSpec::new("x", ColumnType::Real),
            ColumnSpec::new("X", ColumnType::Text),
        ];
        let err = builder.create_table(&case_duplicated, None).unwrap_err();
        assert!(matches!(err, QuickTableError::ValueError { .. }));

        let control = vec![ColumnSpec::new("x\0", ColumnType::Real)];
        assert!(builder.create_table(&control, None).is_err());
    }

    #[test]
    fn test_create_table_quotes_labels() {
        let builder = SqlQueryBuilder::new("points").unwrap();
        let specs = vec![
            ColumnSpec::new("id", ColumnType::Integer),
            ColumnSpec::new("key", ColumnType::Text),
            ColumnSpec::new("名称", ColumnType::Text),
            ColumnSpec::new("x\" REAL); DROP TABLE users; --", ColumnType::Real),
        ];
        let sql = builder.create_table(&specs, Some("id")).unwrap();
        assert_eq!(
            sql,
            r#"CREATE TABLE points("id" INTEGER PRIMARY KEY AUTOINCREMENT, "key" TEXT, "名称" TEXT, "x"" REAL); DROP TABLE users; --" REAL)"#
        );
    }

    #[test]
    fn test_insert_template() {
        let builder = SqlQueryBuilder::new("points").unwrap();
        assert_eq!(
            builder.insert_template(&["id", "x", "label"], Some("id")),
            "INSERT INTO points VALUES (NULL, ?, ?)"
        );
        assert_eq!(
            builder.insert_template(&["x", "id", "label"], Some("id")),
            "INSERT INTO points VALUES (?, NULL, ?)"
        );
        assert_eq!(
            builder.insert_template(&["x", "label"], None),
            "INSERT INTO points VALUES (?, ?)"
        );
    }

    #[test]
    fn test_select_sql() {
        let builder = SqlQueryBuilder::new("points").unwrap();
        let columns = vec!["id".to_string(), "x".to_string()];
        assert_eq!(builder.select(&columns, None), "SELECT id,x FROM points");
        assert_eq!(
            builder.select(&columns, Some("id<? AND id>=?")),
            "SELECT id,x FROM points WHERE id<? AND id>=?"
        );
    }

    #[test]
    fn test_rejects_bad_table_name() {
        assert!(SqlQueryBuilder::new("points; DROP TABLE x").is_err());
        assert!(SqlQueryBuilder::new("").is_err());
    }

    #[test]
    fn test_table_info_and_drop() {
        let builder = SqlQueryBuilder::new("points").unwrap();
        assert_eq!(builder.table_info(), "PRAGMA table_info('points')");
        assert_eq!(builder.drop_table(), "DROP TABLE points");
    }
}
