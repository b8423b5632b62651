use crate::adapter::sqlite::query_builder::SqlQueryBuilder;
use crate::error::{QuickTableError, QuickTableResult};
use crate::table::schema::{ColumnInfo, ColumnSpec, TableSchema};
use rat_logger::{debug, info};
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;

/// 反射表结构
///
/// 目录中没有任何列视为表不存在
pub(crate) async fn reflect_table(
    connection: &mut SqliteConnection,
    table: &str,
) -> QuickTableResult<TableSchema> {
    let sql = SqlQueryBuilder::new(table)?.table_info();

    debug!("执行SQLite表结构反射SQL: {}", sql);

    let rows = sqlx::query(&sql)
        .fetch_all(&mut *connection)
        .await
        .map_err(|e| QuickTableError::storage(&sql, e))?;

    if rows.is_empty() {
        return Err(QuickTableError::TableNotExistError {
            table: table.to_string(),
        });
    }

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let read_err = |e| QuickTableError::storage(&sql, e);
        columns.push(ColumnInfo {
            cid: row.try_get::<i64, _>("cid").map_err(read_err)?,
            name: row.try_get::<String, _>("name").map_err(read_err)?,
            declared_type: row
                .try_get::<Option<String>, _>("type")
                .map_err(read_err)?
                .unwrap_or_default(),
            not_null: row.try_get::<i64, _>("notnull").map_err(read_err)? != 0,
            // 默认值表达式以文本读取，数值字面量也按文本处理
            default_value: row
                .try_get_unchecked::<Option<String>, _>("dflt_value")
                .map_err(read_err)?,
            primary_key: row.try_get::<i64, _>("pk").map_err(read_err)? != 0,
        });
    }

    TableSchema::from_columns(table, columns)
}

/// SQLite创建表操作
pub(crate) async fn create_table(
    connection: &mut SqliteConnection,
    table: &str,
    specs: &[ColumnSpec],
    primary_key: Option<&str>,
) -> QuickTableResult<()> {
    let sql = SqlQueryBuilder::new(table)?.create_table(specs, primary_key)?;

    debug!("执行SQLite建表SQL: {}", sql);

    sqlx::query(&sql)
        .execute(&mut *connection)
        .await
        .map_err(|e| QuickTableError::storage(&sql, e))?;

    info!("成功创建SQLite表: {}", table);
    Ok(())
}

/// SQLite删除表操作
pub(crate) async fn drop_table(connection: &mut SqliteConnection, table: &str) -> QuickTableResult<()> {
    let sql = SqlQueryBuilder::new(table)?.drop_table();

    debug!("执行SQLite删除表SQL: {}", sql);

    sqlx::query(&sql)
        .execute(&mut *connection)
        .await
        .map_err(|e| QuickTableError::storage(&sql, e))?;

    info!("成功删除SQLite表: {}", table);
    Ok(())
}

/// SQLite表存在检查操作
pub(crate) async fn table_exists(connection: &mut SqliteConnection, table: &str) -> QuickTableResult<bool> {
    let sql = SqlQueryBuilder::table_exists();

    let row = sqlx::query(sql)
        .bind(table)
        .fetch_optional(&mut *connection)
        .await
        .map_err(|e| QuickTableError::storage(sql, e))?;

    Ok(row.is_some())
}
