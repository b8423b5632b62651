//! 索引键
//!
//! `Table::get` 接受的键：单个主键、主键范围、单列或多列

use crate::table::query::WhereClause;
use std::ops::{Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo};

/// 表索引键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKey {
    /// 主键等于给定值的行
    Row(i64),
    /// 主键落在半开区间 [start, stop) 内的行，步长只能为空或1
    Range {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },
    /// 单列
    Column(String),
    /// 多列
    Columns(Vec<String>),
}

impl TableKey {
    /// 不带步长的主键范围
    pub fn range(start: Option<i64>, stop: Option<i64>) -> Self {
        TableKey::Range {
            start,
            stop,
            step: None,
        }
    }

    /// 带步长的主键范围
    pub fn stepped(start: Option<i64>, stop: Option<i64>, step: i64) -> Self {
        TableKey::Range {
            start,
            stop,
            step: Some(step),
        }
    }

    /// 从任意整数区间构造，闭区间上界转换为开区间
    pub fn from_bounds<R: RangeBounds<i64>>(range: R) -> Self {
        let start = match range.start_bound() {
            Bound::Included(s) => Some(*s),
            Bound::Excluded(s) => Some(s.saturating_add(1)),
            Bound::Unbounded => None,
        };
        let stop = match range.end_bound() {
            Bound::Included(e) => Some(e.saturating_add(1)),
            Bound::Excluded(e) => Some(*e),
            Bound::Unbounded => None,
        };
        TableKey::range(start, stop)
    }
}

impl std::fmt::Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKey::Row(pk) => write!(f, "{}", pk),
            TableKey::Range { start, stop, step } => {
                let show = |v: &Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
                write!(f, "{}:{}", show(start), show(stop))?;
                if let Some(step) = step {
                    write!(f, ":{}", step)?;
                }
                Ok(())
            }
            TableKey::Column(name) => write!(f, "'{}'", name),
            TableKey::Columns(names) => write!(f, "{:?}", names),
        }
    }
}

/// 主键半开区间转换为查询条件
///
/// 两端都有时为 `pk<? AND pk>=?`，参数顺序为 (stop, start)；只有一端时只生成该端条件；
/// 两端都没有时不过滤
pub(crate) fn range_condition(pk: &str, start: Option<i64>, stop: Option<i64>) -> Option<WhereClause> {
    match (start, stop) {
        (None, None) => None,
        (None, Some(stop)) => Some(WhereClause::with_arg(format!("{}<?", pk), stop)),
        (Some(start), None) => Some(WhereClause::with_arg(format!("{}>=?", pk), start)),
        (Some(start), Some(stop)) => Some(WhereClause::with_args(
            format!("{}<? AND {}>=?", pk, pk),
            [stop, start],
        )),
    }
}

impl From<i64> for TableKey {
    fn from(pk: i64) -> Self {
        TableKey::Row(pk)
    }
}

impl From<i32> for TableKey {
    fn from(pk: i32) -> Self {
        TableKey::Row(pk as i64)
    }
}

impl From<Range<i64>> for TableKey {
    fn from(range: Range<i64>) -> Self {
        TableKey::range(Some(range.start), Some(range.end))
    }
}

impl From<RangeInclusive<i64>> for TableKey {
    fn from(range: RangeInclusive<i64>) -> Self {
        TableKey::from_bounds(range)
    }
}

impl From<RangeTo<i64>> for TableKey {
    fn from(range: RangeTo<i64>) -> Self {
        TableKey::range(None, Some(range.end))
    }
}

impl From<RangeFrom<i64>> for TableKey {
    fn from(range: RangeFrom<i64>) -> Self {
        TableKey::range(Some(range.start), None)
    }
}

impl From<RangeFull> for TableKey {
    fn from(_: RangeFull) -> Self {
        TableKey::range(None, None)
    }
}

impl From<&str> for TableKey {
    fn from(name: &str) -> Self {
        TableKey::Column(name.to_string())
    }
}

impl From<String> for TableKey {
    fn from(name: String) -> Self {
        TableKey::Column(name)
    }
}

impl From<Vec<String>> for TableKey {
    fn from(names: Vec<String>) -> Self {
        TableKey::Columns(names)
    }
}

impl From<Vec<&str>> for TableKey {
    fn from(names: Vec<&str>) -> Self {
        TableKey::Columns(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TableKey {
    fn from(names: [&str; N]) -> Self {
        TableKey::Columns(names.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataValue;

    #[test]
    fn test_range_condition() {
        assert!(range_condition("id", None, None).is_none());

        let upper = range_condition("id", None, Some(3)).unwrap();
        assert_eq!(upper.condition(), "id<?");
        assert_eq!(upper.args(), &[DataValue::Int(3)]);

        let lower = range_condition("id", Some(2), None).unwrap();
        assert_eq!(lower.condition(), "id>=?");
        assert_eq!(lower.args(), &[DataValue::Int(2)]);

        let both = range_condition("id", Some(2), Some(4)).unwrap();
        assert_eq!(both.condition(), "id<? AND id>=?");
        assert_eq!(both.args(), &[DataValue::Int(4), DataValue::Int(2)]);
    }

    #[test]
    fn test_key_conversions() {
        assert_eq!(TableKey::from(3i64), TableKey::Row(3));
        assert_eq!(TableKey::from(2..4), TableKey::range(Some(2), Some(4)));
        assert_eq!(TableKey::from(2..=4), TableKey::range(Some(2), Some(5)));
        assert_eq!(TableKey::from(..3), TableKey::range(None, Some(3)));
        assert_eq!(TableKey::from(2..), TableKey::range(Some(2), None));
        assert_eq!(TableKey::from(..), TableKey::range(None, None));
        assert_eq!(TableKey::from("x"), TableKey::Column("x".to_string()));
        assert_eq!(
            TableKey::from(["x", "y"]),
            TableKey::Columns(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(TableKey::stepped(Some(1), None, 2).to_string(), "1::2");
        assert_eq!(TableKey::range(None, Some(5)).to_string(), ":5");
        assert_eq!(TableKey::Columns(Vec::new()).to_string(), "[]");
    }
}
