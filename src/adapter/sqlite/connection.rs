//! SQLite连接管理
//!
//! 每个操作按配置打开一个独立连接，操作结束（包括出错）后立即关闭，不做连接复用

use crate::error::{QuickTableError, QuickTableResult};
use crate::types::SqliteConfig;
use rat_logger::{debug, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::time::Duration;

/// 打开SQLite连接
pub(crate) async fn open_connection(config: &SqliteConfig) -> QuickTableResult<SqliteConnection> {
    config.validate()?;

    // 文件不存在且不允许创建时，给出比驱动更明确的错误
    if !config.create_if_missing && !std::path::Path::new(&config.path).exists() {
        return Err(crate::quick_error!(
            connection,
            crate::i18n::tf("error.sqlite_file_not_found", &[("path", &config.path)])
        ));
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(config.create_if_missing)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    debug!("打开SQLite连接: 路径={}", config.path);

    SqliteConnection::connect_with(&options).await.map_err(|e| {
        warn!("SQLite连接失败: 路径={}, 错误={}", config.path, e);
        QuickTableError::ConnectionError {
            message: crate::i18n::tf("error.sqlite_connection", &[("message", &e.to_string())]),
        }
    })
}

/// 关闭连接
///
/// 关闭失败只记录日志，不覆盖操作本身的结果
pub(crate) async fn close_connection(connection: SqliteConnection) {
    if let Err(e) = connection.close().await {
        warn!("关闭SQLite连接失败: {}", e);
    }
}
