//! # 便捷配置函数

use crate::error::QuickTableResult;
use crate::types::SqliteConfig;

/// 创建SQLite配置：文件不存在时自动创建，使用默认忙等待超时
///
/// # 参数
///
/// * `path` - 数据库文件路径
pub fn sqlite_config<P: Into<String>>(path: P) -> QuickTableResult<SqliteConfig> {
    let config = SqliteConfig::new(path);
    config.validate()?;
    Ok(config)
}
