use crate::adapter::sqlite::data_conversion::{bind_values, row_to_values};
use crate::error::{QuickTableError, QuickTableResult};
use crate::types::DataValue;
use rat_logger::debug;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

/// 批量执行插入模板
///
/// 所有行共用同一条预编译语句，并在同一个事务中提交；任一行失败时整批回滚
pub(crate) async fn insert_rows(
    connection: &mut SqliteConnection,
    sql: &str,
    rows: &[Vec<DataValue>],
) -> QuickTableResult<u64> {
    debug!("执行SQLite插入SQL: {}, 行数={}", sql, rows.len());

    let mut tx = connection
        .begin()
        .await
        .map_err(|e| QuickTableError::storage("BEGIN", e))?;

    let mut inserted = 0u64;
    for row in rows {
        let query = bind_values(sqlx::query(sql), row);
        let result = query
            .execute(&mut *tx)
            .await
            .map_err(|e| QuickTableError::storage(sql, e))?;
        inserted += result.rows_affected();
    }

    // 提前返回时 tx 被丢弃，sqlx 会自动回滚
    tx.commit()
        .await
        .map_err(|e| QuickTableError::storage("COMMIT", e))?;

    Ok(inserted)
}

/// 执行查询并取回全部行
pub(crate) async fn select_rows(
    connection: &mut SqliteConnection,
    sql: &str,
    args: &[DataValue],
) -> QuickTableResult<Vec<Vec<DataValue>>> {
    debug!("执行SQLite查询SQL: {}, 参数={:?}", sql, args);

    let rows = bind_values(sqlx::query(sql), args)
        .fetch_all(&mut *connection)
        .await
        .map_err(|e| QuickTableError::storage(sql, e))?;

    rows.iter().map(|row| row_to_values(row, sql)).collect()
}
