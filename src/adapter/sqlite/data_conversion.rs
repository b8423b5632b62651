//! SQLite数据转换模块
//!
//! DataValue 与 sqlx 参数/行之间的转换

use crate::error::{QuickTableError, QuickTableResult};
use crate::types::DataValue;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};

/// 存储类别，取自值本身而不是列的声明类型
enum StorageClass {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

/// 绑定单个参数
pub(crate) fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &DataValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        DataValue::Null => query.bind(Option::<String>::None),
        DataValue::Int(i) => query.bind(*i),
        DataValue::Float(f) => query.bind(*f),
        DataValue::String(s) => query.bind(s.clone()),
        DataValue::Bytes(bytes) => query.bind(bytes.clone()),
    }
}

/// 按顺序绑定一组参数
pub(crate) fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: &[DataValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = bind_value(query, value);
    }
    query
}

/// 将sqlx的行按列顺序转换为 DataValue 列表
pub(crate) fn row_to_values(row: &SqliteRow, sql: &str) -> QuickTableResult<Vec<DataValue>> {
    let mut values = Vec::with_capacity(row.len());

    for index in 0..row.len() {
        let class = {
            let raw = row
                .try_get_raw(index)
                .map_err(|e| QuickTableError::storage(sql, e))?;
            if raw.is_null() {
                StorageClass::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" | "BOOLEAN" => StorageClass::Integer,
                    "REAL" | "NUMERIC" => StorageClass::Real,
                    "BLOB" => StorageClass::Blob,
                    _ => StorageClass::Text,
                }
            }
        };

        let value = match class {
            StorageClass::Null => DataValue::Null,
            StorageClass::Integer => DataValue::Int(
                row.try_get_unchecked::<i64, _>(index)
                    .map_err(|e| QuickTableError::storage(sql, e))?,
            ),
            StorageClass::Real => DataValue::Float(
                row.try_get_unchecked::<f64, _>(index)
                    .map_err(|e| QuickTableError::storage(sql, e))?,
            ),
            StorageClass::Text => DataValue::String(
                row.try_get_unchecked::<String, _>(index)
                    .map_err(|e| QuickTableError::storage(sql, e))?,
            ),
            StorageClass::Blob => DataValue::Bytes(
                row.try_get_unchecked::<Vec<u8>, _>(index)
                    .map_err(|e| QuickTableError::storage(sql, e))?,
            ),
        };

        crate::debug_log!("列 {} 读取为 {}: {}", index, value.type_name(), value);
        values.push(value);
    }

    Ok(values)
}
