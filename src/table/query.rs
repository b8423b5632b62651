//! 查询参数：列选择和条件

use crate::types::DataValue;

/// 查询的列
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnSelection {
    /// 全部列
    #[default]
    All,
    /// 单列
    One(String),
    /// 多列，按给定顺序
    Many(Vec<String>),
}

impl From<&str> for ColumnSelection {
    fn from(name: &str) -> Self {
        ColumnSelection::One(name.to_string())
    }
}

impl From<String> for ColumnSelection {
    fn from(name: String) -> Self {
        ColumnSelection::One(name)
    }
}

impl From<Vec<String>> for ColumnSelection {
    fn from(names: Vec<String>) -> Self {
        ColumnSelection::Many(names)
    }
}

impl From<Vec<&str>> for ColumnSelection {
    fn from(names: Vec<&str>) -> Self {
        ColumnSelection::Many(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelection {
    fn from(names: [&str; N]) -> Self {
        ColumnSelection::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<ColumnSelection>> From<Option<T>> for ColumnSelection {
    fn from(selection: Option<T>) -> Self {
        selection.map(Into::into).unwrap_or_default()
    }
}

/// WHERE 条件
///
/// 条件模板使用 `?` 占位符，原样拼接进SQL；参数按顺序绑定
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    condition: String,
    args: Vec<DataValue>,
}

impl WhereClause {
    /// 不带参数的条件
    pub fn new<S: Into<String>>(condition: S) -> Self {
        Self {
            condition: condition.into(),
            args: Vec::new(),
        }
    }

    /// 带单个参数的条件
    pub fn with_arg<S: Into<String>, V: Into<DataValue>>(condition: S, arg: V) -> Self {
        Self::new(condition).bind(arg)
    }

    /// 带一组参数的条件
    pub fn with_args<S, I, V>(condition: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<DataValue>,
    {
        Self::new(condition).bind_all(args)
    }

    /// 追加一个参数
    pub fn bind<V: Into<DataValue>>(mut self, arg: V) -> Self {
        self.args.push(arg.into());
        self
    }

    /// 追加一组参数
    pub fn bind_all<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DataValue>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn args(&self) -> &[DataValue] {
        &self.args
    }
}
