//! 插入行
//!
//! 一行可以是列名到值的映射，也可以是按物理列顺序（跳过主键）排列的值序列

use crate::error::QuickTableResult;
use crate::types::DataValue;
use std::collections::HashMap;

/// 待插入的一行
#[derive(Debug, Clone, PartialEq)]
pub enum InsertRow {
    /// 列名到值的映射，缺少的列写入 NULL，多余的键忽略
    Mapping(HashMap<String, DataValue>),
    /// 按非主键列顺序排列的值，数量必须与非主键列数一致
    Positional(Vec<DataValue>),
}

impl InsertRow {
    pub fn mapping(values: HashMap<String, DataValue>) -> Self {
        InsertRow::Mapping(values)
    }

    /// 从 (列名, 值) 对构建映射行
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DataValue>,
    {
        InsertRow::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DataValue>,
    {
        InsertRow::Positional(values.into_iter().map(Into::into).collect())
    }

    /// 按非主键列顺序生成绑定参数
    pub(crate) fn bind_for(&self, value_columns: &[&str]) -> QuickTableResult<Vec<DataValue>> {
        match self {
            InsertRow::Mapping(values) => Ok(value_columns
                .iter()
                .map(|column| values.get(*column).cloned().unwrap_or(DataValue::Null))
                .collect()),
            InsertRow::Positional(values) => {
                if values.len() != value_columns.len() {
                    return Err(crate::quick_error!(
                        value,
                        "insert",
                        crate::i18n::tf(
                            "error.insert_arity",
                            &[
                                ("expected", &value_columns.len().to_string()),
                                ("actual", &values.len().to_string()),
                            ],
                        )
                    ));
                }
                Ok(values.clone())
            }
        }
    }
}

impl From<HashMap<String, DataValue>> for InsertRow {
    fn from(values: HashMap<String, DataValue>) -> Self {
        InsertRow::Mapping(values)
    }
}

impl From<Vec<DataValue>> for InsertRow {
    fn from(values: Vec<DataValue>) -> Self {
        InsertRow::Positional(values)
    }
}

impl<K: Into<String>, V: Into<DataValue>, const N: usize> From<[(K, V); N]> for InsertRow {
    fn from(pairs: [(K, V); N]) -> Self {
        InsertRow::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuickTableError;

    #[test]
    fn test_mapping_fills_missing_with_null() {
        let row = InsertRow::from([("x", DataValue::Float(1.5)), ("extra", DataValue::Int(9))]);
        let values = row.bind_for(&["x", "label"]).unwrap();
        assert_eq!(values, vec![DataValue::Float(1.5), DataValue::Null]);
    }

    #[test]
    fn test_positional_arity() {
        let row = InsertRow::positional([DataValue::Float(1.0), DataValue::from("a")]);
        assert_eq!(row.bind_for(&["x", "label"]).unwrap().len(), 2);

        let err = row.bind_for(&["x"]).unwrap_err();
        assert!(matches!(err, QuickTableError::ValueError { .. }));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(
            InsertRow::from_pairs(Vec::<(String, DataValue)>::new())
                .bind_for(&["x"])
                .unwrap(),
            vec![DataValue::Null]
        );
        assert!(InsertRow::positional(Vec::<DataValue>::new()).bind_for(&[]).unwrap().is_empty());
    }
}
