//! 表访问模块
//!
//! `Table` 是对一张已存在SQLite表的句柄：打开时通过目录反射结构，之后结构不再变化。
//! 每个操作各自打开并关闭一个连接

pub mod key;
pub mod query;
pub mod row;
pub mod schema;

pub use key::TableKey;
pub use query::{ColumnSelection, WhereClause};
pub use row::InsertRow;
pub use schema::{ColumnInfo, ColumnSpec, TableSchema, PRIMARY_KEY_SUFFIX};

use crate::adapter::sqlite::connection::{close_connection, open_connection};
use crate::adapter::sqlite::{operations, schema as sqlite_schema};
use crate::adapter::SqlQueryBuilder;
use crate::error::QuickTableResult;
use crate::frame::DataFrame;
use crate::security::{quote_identifier, validate_column_name};
use crate::types::SqliteConfig;
use rat_logger::{debug, info};
use std::ops::RangeBounds;

/// 表句柄
#[derive(Debug, Clone)]
pub struct Table {
    config: SqliteConfig,
    schema: TableSchema,
}

impl Table {
    /// 打开已存在的表并反射其结构
    ///
    /// 表不存在返回 TableNotExistError，多个主键列返回 SchemaError
    pub async fn open<C: Into<SqliteConfig>>(config: C, name: &str) -> QuickTableResult<Self> {
        let config = config.into();
        let mut connection = open_connection(&config).await?;
        let result = sqlite_schema::reflect_table(&mut connection, name).await;
        close_connection(connection).await;
        let schema = result?;

        debug!("打开表: {}", schema.display_form());
        Ok(Self { config, schema })
    }

    /// 创建新表并返回其句柄
    ///
    /// 所有列定义校验在连接数据库之前完成，校验失败时不会执行任何DDL
    pub async fn create<C, I, S>(
        config: C,
        name: &str,
        specs: I,
        primary_key: Option<&str>,
    ) -> QuickTableResult<Self>
    where
        C: Into<SqliteConfig>,
        I: IntoIterator<Item = S>,
        S: Into<ColumnSpec>,
    {
        let config = config.into();
        let specs: Vec<ColumnSpec> = specs.into_iter().map(Into::into).collect();
        SqlQueryBuilder::new(name)?.create_table(&specs, primary_key)?;

        let mut connection = open_connection(&config).await?;
        let result = sqlite_schema::create_table(&mut connection, name, &specs, primary_key).await;
        close_connection(connection).await;
        result?;

        // 重新反射，句柄结构以目录为准
        Self::open(config, name).await
    }

    /// 删除表，句柄之后的操作都会失败
    pub async fn drop(&self) -> QuickTableResult<()> {
        drop_table(self.config.clone(), self.name()).await
    }

    /// 表当前是否存在
    pub async fn exists(&self) -> QuickTableResult<bool> {
        table_exists(self.config.clone(), self.name()).await
    }

    /// 插入一行全部为 NULL 的数据
    pub async fn insert_empty(&self) -> QuickTableResult<u64> {
        self.insert_many([InsertRow::Mapping(Default::default())]).await
    }

    /// 插入一行
    pub async fn insert_one<R: Into<InsertRow>>(&self, row: R) -> QuickTableResult<u64> {
        self.insert_many([row]).await
    }

    /// 批量插入
    ///
    /// 全部行先做校验再连接数据库；执行在同一事务中，任一行失败整批回滚。
    /// 返回插入的行数
    pub async fn insert_many<I, R>(&self, rows: I) -> QuickTableResult<u64>
    where
        I: IntoIterator<Item = R>,
        R: Into<InsertRow>,
    {
        let value_columns = self.schema.value_columns();
        let bound = rows
            .into_iter()
            .map(|row| row.into().bind_for(&value_columns))
            .collect::<QuickTableResult<Vec<_>>>()?;

        if bound.is_empty() {
            return Ok(0);
        }

        let sql = SqlQueryBuilder::new(self.name())?
            .insert_template(&self.schema.column_names(), self.primary_key());

        let mut connection = open_connection(&self.config).await?;
        let result = operations::insert_rows(&mut connection, &sql, &bound).await;
        close_connection(connection).await;
        let inserted = result?;

        info!("向表 {} 插入 {} 行", self.name(), inserted);
        Ok(inserted)
    }

    /// 查询
    ///
    /// 指定了列且表有主键时，主键总会出现在结果中并作为行索引。
    /// 数值形式的文本会转换为浮点数
    pub async fn select<S: Into<ColumnSelection>>(
        &self,
        columns: S,
        filter: Option<WhereClause>,
    ) -> QuickTableResult<DataFrame> {
        let labels = self.resolve_columns(columns.into())?;
        let selected: Vec<String> = labels.iter().map(|label| self.column_sql(label)).collect();

        let sql = SqlQueryBuilder::new(self.name())?
            .select(&selected, filter.as_ref().map(WhereClause::condition));
        let args = filter.as_ref().map(WhereClause::args).unwrap_or_default();

        let mut connection = open_connection(&self.config).await?;
        let result = operations::select_rows(&mut connection, &sql, args).await;
        close_connection(connection).await;
        let records = result?;

        Ok(DataFrame::from_records(records, labels, self.primary_key(), true))
    }

    /// 查询全部列
    pub async fn select_all(&self, filter: Option<WhereClause>) -> QuickTableResult<DataFrame> {
        self.select(ColumnSelection::All, filter).await
    }

    /// 按索引键取数据
    pub async fn get<K: Into<TableKey>>(&self, key: K) -> QuickTableResult<DataFrame> {
        match key.into() {
            TableKey::Row(value) => {
                let pk = self.require_primary_key()?;
                let filter = WhereClause::with_arg(format!("{}=?", quote_identifier(pk)), value);
                self.select_all(Some(filter)).await
            }
            TableKey::Range { start, stop, step } => {
                let pk = self.require_primary_key()?;
                if let Some(step) = step.filter(|s| *s != 1) {
                    return Err(crate::quick_error!(
                        value,
                        "step",
                        crate::i18n::tf("error.slice_step", &[("step", &step.to_string())])
                    ));
                }
                self.select_all(key::range_condition(&quote_identifier(pk), start, stop))
                    .await
            }
            TableKey::Column(name) => self.select(ColumnSelection::One(name), None).await,
            TableKey::Columns(names) => {
                if names.is_empty() {
                    let key = TableKey::Columns(names);
                    return Err(crate::quick_error!(
                        value,
                        "key",
                        crate::i18n::tf("error.invalid_key", &[("key", &key.to_string())])
                    ));
                }
                self.select(ColumnSelection::Many(names), None).await
            }
        }
    }

    /// 主键等于 `pk` 的行
    pub async fn row(&self, pk: i64) -> QuickTableResult<DataFrame> {
        self.get(TableKey::Row(pk)).await
    }

    /// 主键落在区间内的行
    pub async fn rows<R: RangeBounds<i64>>(&self, range: R) -> QuickTableResult<DataFrame> {
        self.get(TableKey::from_bounds(range)).await
    }

    /// 单列（有主键时带主键索引）
    pub async fn column(&self, name: &str) -> QuickTableResult<DataFrame> {
        self.get(TableKey::Column(name.to_string())).await
    }

    /// 多列（有主键时带主键索引）
    pub async fn columns<I, S>(&self, names: I) -> QuickTableResult<DataFrame>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.get(TableKey::Columns(names.into_iter().map(Into::into).collect()))
            .await
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// 数据库文件路径
    pub fn database(&self) -> &str {
        &self.config.path
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.schema.primary_key()
    }

    /// 目录中的完整列信息
    pub fn column_info(&self) -> &[ColumnInfo] {
        self.schema.columns()
    }

    pub fn declared_type(&self, column: &str) -> Option<&str> {
        self.schema.declared_type(column)
    }

    fn require_primary_key(&self) -> QuickTableResult<&str> {
        self.primary_key().ok_or_else(|| {
            crate::quick_error!(
                value,
                "key",
                crate::i18n::tf("error.no_primary_key", &[("table", self.name())])
            )
        })
    }

    /// 解析列选择，必要时在最前面补上主键
    ///
    /// 目录中已有的列（ASCII不区分大小写）统一为目录中的写法，不再做标识符验证；
    /// 其他列名必须通过验证，交给存储层报告列不存在
    fn resolve_columns(&self, selection: ColumnSelection) -> QuickTableResult<Vec<String>> {
        let requested = match selection {
            ColumnSelection::All => {
                return Ok(self.column_names().into_iter().map(String::from).collect());
            }
            ColumnSelection::One(name) => vec![name],
            ColumnSelection::Many(names) => {
                if names.is_empty() {
                    return Err(crate::quick_error!(
                        value,
                        "columns",
                        crate::i18n::t("error.empty_column_selection")
                    ));
                }
                names
            }
        };

        let mut columns = Vec::with_capacity(requested.len() + 1);
        for name in requested {
            match self.schema.resolve_column(&name) {
                Some(known) => columns.push(known.to_string()),
                None => {
                    validate_column_name(&name)?;
                    columns.push(name);
                }
            }
        }

        if let Some(pk) = self.primary_key() {
            if !columns.iter().any(|c| c == pk) {
                columns.insert(0, pk.to_string());
            }
        }
        Ok(columns)
    }

    /// 查询列的SQL片段：目录中的列加引号，其他列名已验证，原样使用
    fn column_sql(&self, label: &str) -> String {
        match self.schema.resolve_column(label) {
            Some(known) => quote_identifier(known),
            None => label.to_string(),
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.schema.display_form())
    }
}

/// 表是否存在
pub async fn table_exists<C: Into<SqliteConfig>>(config: C, name: &str) -> QuickTableResult<bool> {
    let config = config.into();
    let mut connection = open_connection(&config).await?;
    let result = sqlite_schema::table_exists(&mut connection, name).await;
    close_connection(connection).await;
    result
}

/// 按名称删除表
pub async fn drop_table<C: Into<SqliteConfig>>(config: C, name: &str) -> QuickTableResult<()> {
    let config = config.into();
    let mut connection = open_connection(&config).await?;
    let result = sqlite_schema::drop_table(&mut connection, name).await;
    close_connection(connection).await;
    result
}
