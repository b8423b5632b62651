//! 查询结果表
//!
//! `DataFrame` 是带列标签的二维结果。主键在结果列中时作为行索引，
//! 否则按位置 0..n 编号

use crate::types::DataValue;
use serde::Serialize;
use std::collections::HashMap;

/// 查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataFrame {
    /// 数据列标签（不含索引列）
    columns: Vec<String>,
    /// 索引列名，按位置编号时为 None
    index_name: Option<String>,
    /// 每行的索引值
    index: Vec<DataValue>,
    /// 行数据，与 columns 对齐
    data: Vec<Vec<DataValue>>,
}

impl DataFrame {
    /// 从记录构建结果表
    ///
    /// # 参数
    /// * `records` - 按 `labels` 顺序排列的行
    /// * `labels` - 列标签
    /// * `index` - 作为行索引的列，必须出现在 `labels` 中，否则按位置编号
    /// * `coerce_float` - 是否把数值形式的文本转换为浮点数
    pub fn from_records(
        records: Vec<Vec<DataValue>>,
        labels: Vec<String>,
        index: Option<&str>,
        coerce_float: bool,
    ) -> Self {
        let index_position = index.and_then(|name| labels.iter().position(|l| l == name));

        let mut index_values = Vec::with_capacity(records.len());
        let mut data = Vec::with_capacity(records.len());

        for (position, record) in records.into_iter().enumerate() {
            let mut record: Vec<DataValue> = if coerce_float {
                record.into_iter().map(DataValue::coerce_float).collect()
            } else {
                record
            };

            match index_position {
                Some(i) if i < record.len() => index_values.push(record.remove(i)),
                _ => index_values.push(DataValue::Int(position as i64)),
            }
            data.push(record);
        }

        let (columns, index_name) = match index_position {
            Some(i) => {
                let mut columns = labels;
                let name = columns.remove(i);
                (columns, Some(name))
            }
            None => (labels, None),
        };

        Self {
            columns,
            index_name,
            index: index_values,
            data,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn index(&self) -> &[DataValue] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 按位置取行
    pub fn row(&self, position: usize) -> Option<&[DataValue]> {
        self.data.get(position).map(|r| r.as_slice())
    }

    /// 按索引值取行
    pub fn loc(&self, label: &DataValue) -> Option<&[DataValue]> {
        self.index
            .iter()
            .position(|v| v == label)
            .and_then(|i| self.row(i))
    }

    /// 按列名取一整列，索引列名返回索引值
    pub fn column(&self, name: &str) -> Option<Vec<&DataValue>> {
        if self.index_name.as_deref() == Some(name) {
            return Some(self.index.iter().collect());
        }
        let i = self.columns.iter().position(|c| c == name)?;
        Some(self.data.iter().map(|row| &row[i]).collect())
    }

    /// 按索引值和列名取单元格
    pub fn value(&self, label: &DataValue, column: &str) -> Option<&DataValue> {
        let i = self.columns.iter().position(|c| c == column)?;
        self.loc(label).map(|row| &row[i])
    }

    /// 逐行迭代：(索引值, 行数据)
    pub fn iter(&self) -> impl Iterator<Item = (&DataValue, &[DataValue])> {
        self.index.iter().zip(self.data.iter().map(|r| r.as_slice()))
    }

    /// 转换为记录列表，有索引列时包含索引列
    pub fn to_records(&self) -> Vec<HashMap<String, DataValue>> {
        self.iter()
            .map(|(label, row)| {
                let mut record: HashMap<String, DataValue> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                if let Some(name) = &self.index_name {
                    record.insert(name.clone(), label.clone());
                }
                record
            })
            .collect()
    }

    /// 转换为 JSON 对象数组
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .iter()
            .map(|(label, row)| {
                let mut object = serde_json::Map::new();
                if let Some(name) = &self.index_name {
                    object.insert(name.clone(), label.to_json_value());
                }
                for (column, value) in self.columns.iter().zip(row) {
                    object.insert(column.clone(), value.to_json_value());
                }
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

impl std::fmt::Display for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self
            .columns
            .iter()
            .map(|c| format!("{:15}", c))
            .collect::<Vec<String>>()
            .join(" | ");
        writeln!(f, "{:>5} | {} |", self.index_name.as_deref().unwrap_or(""), header)?;

        for (label, row) in self.iter() {
            let cells = row
                .iter()
                .map(|v| format!("{:15}", v.to_string()))
                .collect::<Vec<String>>()
                .join(" | ");
            writeln!(f, "{:>5} | {} |", label.to_string(), cells)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primary_key_becomes_index() {
        let frame = DataFrame::from_records(
            vec![
                vec![DataValue::Int(1), DataValue::from("1.5"), DataValue::from("a")],
                vec![DataValue::Int(2), DataValue::Float(2.5), DataValue::from("b")],
            ],
            labels(&["id", "x", "name"]),
            Some("id"),
            true,
        );

        assert_eq!(frame.index_name(), Some("id"));
        assert_eq!(frame.columns(), &["x".to_string(), "name".to_string()]);
        assert_eq!(frame.index(), &[DataValue::Int(1), DataValue::Int(2)]);
        assert_eq!(frame.value(&DataValue::Int(1), "x"), Some(&DataValue::Float(1.5)));
        assert_eq!(frame.value(&DataValue::Int(2), "name"), Some(&DataValue::from("b")));
        assert_eq!(frame.column("id").unwrap().len(), 2);
    }

    #[test]
    fn test_positional_index() {
        let frame = DataFrame::from_records(
            vec![vec![DataValue::from("7")], vec![DataValue::Null]],
            labels(&["x"]),
            None,
            false,
        );
        assert_eq!(frame.index_name(), None);
        assert_eq!(frame.index(), &[DataValue::Int(0), DataValue::Int(1)]);
        // 未开启转换时文本保持原样
        assert_eq!(frame.row(0), Some(&[DataValue::from("7")][..]));
    }

    #[test]
    fn test_missing_index_label_falls_back_to_positions() {
        let frame = DataFrame::from_records(
            vec![vec![DataValue::Int(5)]],
            labels(&["x"]),
            Some("id"),
            true,
        );
        assert_eq!(frame.index_name(), None);
        assert_eq!(frame.columns(), &["x".to_string()]);
    }

    #[test]
    fn test_records_and_json() {
        let frame = DataFrame::from_records(
            vec![vec![DataValue::Int(3), DataValue::from("q")]],
            labels(&["id", "name"]),
            Some("id"),
            true,
        );
        let records = frame.to_records();
        assert_eq!(records[0]["id"], DataValue::Int(3));
        assert_eq!(records[0]["name"], DataValue::from("q"));
        assert_eq!(frame.to_json(), serde_json::json!([{"id": 3, "name": "q"}]));
    }

    #[test]
    fn test_empty_frame() {
        let frame = DataFrame::from_records(Vec::new(), labels(&["id", "x"]), Some("id"), true);
        assert!(frame.is_empty());
        assert_eq!(frame.columns(), &["x".to_string()]);
        assert!(frame.loc(&DataValue::Int(1)).is_none());
    }
}
