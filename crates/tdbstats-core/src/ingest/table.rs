//! In-memory tabular input
//!
//! A [`TransactionTable`] mirrors a two-column data frame: an integer `ts`
//! column and a list-valued `Transactions` (or `Patterns`) column. Tables can
//! be assembled in code or decoded from JSON in either the columnar shape
//! (`{"ts": [..], "Transactions": [[..]]}`) or the records shape
//! (`[{"ts": 1, "Transactions": [..]}, ..]`).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const TS_COLUMN: &str = "ts";

/// Name of the list-valued column holding the transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionColumn {
    #[default]
    Transactions,
    Patterns,
}

impl TransactionColumn {
    /// Column header as it appears in the input
    pub fn name(&self) -> &'static str {
        match self {
            TransactionColumn::Transactions => "Transactions",
            TransactionColumn::Patterns => "Patterns",
        }
    }

    /// Pick the transaction column present in a JSON object.
    /// `Transactions` wins when both are present.
    fn detect(map: &Map<String, Value>) -> Option<Self> {
        [TransactionColumn::Transactions, TransactionColumn::Patterns]
            .into_iter()
            .find(|column| map.contains_key(column.name()))
    }
}

/// One row of a [`TransactionTable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub ts: i64,
    pub items: Vec<String>,
}

/// Tabular temporal database input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    column: TransactionColumn,
    rows: Vec<TableRow>,
}

impl TransactionTable {
    /// Create an empty table
    pub fn new(column: TransactionColumn) -> Self {
        Self {
            column,
            rows: Vec::new(),
        }
    }

    /// Build a table from rows
    pub fn from_rows(column: TransactionColumn, rows: Vec<TableRow>) -> Self {
        Self { column, rows }
    }

    /// Build a table from parallel columns
    pub fn from_columns(
        column: TransactionColumn,
        ts: Vec<i64>,
        transactions: Vec<Vec<String>>,
    ) -> Result<Self> {
        if ts.len() != transactions.len() {
            return Err(Error::table(format!(
                "column length mismatch: 'ts' has {} rows, '{}' has {}",
                ts.len(),
                column.name(),
                transactions.len()
            )));
        }

        let rows = ts
            .into_iter()
            .zip(transactions)
            .map(|(ts, items)| TableRow { ts, items })
            .collect();

        Ok(Self { column, rows })
    }

    /// Append a row
    pub fn push_row(&mut self, ts: i64, items: Vec<String>) {
        self.rows.push(TableRow { ts, items });
    }

    pub fn column(&self) -> TransactionColumn {
        self.column
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode a table from a JSON document
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(&value)
    }

    /// Decode a table from a JSON file. A missing file is [`Error::NotFound`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::from_json_value(&value)
    }

    /// Decode a table from a parsed JSON value
    pub fn from_json_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_column_map(map),
            Value::Array(rows) => Self::from_record_list(rows),
            other => Err(Error::table(format!(
                "expected a JSON object of columns or an array of rows, found {}",
                json_type(other)
            ))),
        }
    }

    fn from_column_map(map: &Map<String, Value>) -> Result<Self> {
        let column = required_column(map)?;

        let ts = map
            .get(TS_COLUMN)
            .and_then(Value::as_array)
            .ok_or_else(|| Error::table("column 'ts' must be an array"))?;
        let transactions = map
            .get(column.name())
            .and_then(Value::as_array)
            .ok_or_else(|| Error::table(format!("column '{}' must be an array", column.name())))?;

        let ts = ts
            .iter()
            .enumerate()
            .map(|(row, v)| parse_ts(v, row))
            .collect::<Result<Vec<_>>>()?;
        let transactions = transactions
            .iter()
            .enumerate()
            .map(|(row, v)| parse_items(v, row))
            .collect::<Result<Vec<_>>>()?;

        Self::from_columns(column, ts, transactions)
    }

    fn from_record_list(rows: &[Value]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let column = match first {
            Value::Object(map) => required_column(map)?,
            other => {
                return Err(Error::table(format!(
                    "row 0 must be an object, found {}",
                    json_type(other)
                )))
            }
        };

        let mut table = Self::new(column);
        for (index, row) in rows.iter().enumerate() {
            let map = row.as_object().ok_or_else(|| {
                Error::table(format!("row {} must be an object, found {}", index, json_type(row)))
            })?;
            let ts = map
                .get(TS_COLUMN)
                .ok_or_else(|| Error::table(format!("row {} has no 'ts' value", index)))?;
            let items = map.get(column.name()).ok_or_else(|| {
                Error::table(format!("row {} has no '{}' value", index, column.name()))
            })?;
            table.push_row(parse_ts(ts, index)?, parse_items(items, index)?);
        }

        Ok(table)
    }
}

fn required_column(map: &Map<String, Value>) -> Result<TransactionColumn> {
    if !map.contains_key(TS_COLUMN) {
        return Err(Error::table("missing required column 'ts'"));
    }
    TransactionColumn::detect(map)
        .ok_or_else(|| Error::table("missing required column 'Transactions' or 'Patterns'"))
}

fn parse_ts(value: &Value, row: usize) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::table(format!("row {}: 'ts' value {} is not an integer", row, value)))
}

/// Whole floats inside the `i64` range. `i64::MAX as f64` rounds up to 2^63,
/// so the upper bound is exclusive.
fn integral_f64(f: f64) -> Option<i64> {
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = -(i64::MIN as f64);
    (f.fract() == 0.0 && (LOWER..UPPER).contains(&f)).then_some(f as i64)
}

fn parse_items(value: &Value, row: usize) -> Result<Vec<String>> {
    let list = value.as_array().ok_or_else(|| {
        Error::table(format!("row {}: transaction must be a list, found {}", row, json_type(value)))
    })?;

    list.iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(Error::table(format!(
                "row {}: unsupported item {}",
                row,
                json_type(other)
            ))),
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columnar_json() {
        let table = TransactionTable::from_json_value(&json!({
            "ts": [1, 1, 3],
            "Transactions": [["a", "d", "e"], ["b", "a", "f", "g", "h"], ["b", "a", "d", "f"]]
        }))
        .unwrap();

        assert_eq!(table.column(), TransactionColumn::Transactions);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1].items.len(), 5);
    }

    #[test]
    fn test_records_json_with_patterns_column() {
        let table = TransactionTable::from_json_str(
            r#"[{"ts": "2", "Patterns": ["x", 7]}, {"ts": 5.0, "Patterns": []}]"#,
        )
        .unwrap();

        assert_eq!(table.column(), TransactionColumn::Patterns);
        assert_eq!(table.rows()[0], TableRow { ts: 2, items: vec!["x".into(), "7".into()] });
        assert_eq!(table.rows()[1].ts, 5);
        assert!(table.rows()[1].items.is_empty());
    }

    #[test]
    fn test_missing_columns_rejected() {
        let err = TransactionTable::from_json_value(&json!({"Transactions": [["a"]]})).unwrap_err();
        assert!(err.to_string().contains("'ts'"));

        let err = TransactionTable::from_json_value(&json!({"ts": [1], "Items": [["a"]]})).unwrap_err();
        assert!(err.to_string().contains("'Transactions' or 'Patterns'"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = TransactionTable::from_columns(
            TransactionColumn::Transactions,
            vec![1, 2],
            vec![vec!["a".to_string()]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_non_integer_timestamp_rejected() {
        let err = TransactionTable::from_json_value(&json!({"ts": [1.5], "Transactions": [["a"]]}))
            .unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn test_float_timestamps_outside_i64_rejected() {
        for ts in [1e30, -1e30, 9223372036854775808.0] {
            let err = TransactionTable::from_json_value(&json!({"ts": [ts], "Transactions": [["a"]]}))
                .unwrap_err();
            assert!(err.to_string().contains("not an integer"), "accepted {}", ts);
        }

        let table = TransactionTable::from_json_value(&json!({
            "ts": [2.0, -9223372036854775808.0],
            "Transactions": [["a"], ["b"]]
        }))
        .unwrap();
        assert_eq!(table.rows()[0].ts, 2);
        assert_eq!(table.rows()[1].ts, i64::MIN);
    }

    #[test]
    fn test_empty_records_list_is_empty_table() {
        let table = TransactionTable::from_json_str("[]").unwrap();
        assert!(table.is_empty());
    }
}
