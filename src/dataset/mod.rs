//! # Dataset Model
//!
//! A column-oriented table: ordered, uniquely named columns of scalar
//! [`Value`]s, all the same length.
//!
//! Datasets arrive row-oriented (one flat JSON object per row) and are
//! pivoted into columns by [`Dataset::from_rows`]. Date/time columns are
//! normalized at that point, so renderers never deal with raw strings for
//! temporal data.
//!
//! ```
//! use tablero::dataset::{Dataset, Value};
//! use serde_json::json;
//!
//! let data = Dataset::from_json(json!([
//!     {"region": "North", "sales": 10},
//!     {"region": "South", "sales": 20},
//! ]))?;
//!
//! assert_eq!(data.row_count(), 2);
//! assert_eq!(data.column("sales").unwrap().sum().unwrap(), 30.0);
//! assert_eq!(data.column("region").unwrap().values()[1], Value::Text("South".into()));
//! # Ok::<(), tablero::TableroError>(())
//! ```

pub mod temporal;

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{ElementError, TableroError};
use crate::render::format;

/// One JSON row as delivered by a loader.
pub type Row = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// VALUE
// ============================================================================

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent, JSON `null`, or a failed temporal coercion.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Numeric view of the cell. Booleans count as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::Text(s),
            nested => Value::Text(nested.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format::plain(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Timestamp(ts) if ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0 => {
                write!(f, "{}", ts.format("%Y-%m-%d"))
            }
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Timestamp(ts) => {
                serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.f"))
            }
        }
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// First cell, if any.
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Numeric view of every cell. `Null` becomes `None`; any other
    /// non-numeric cell is an error.
    pub fn numbers(&self) -> Result<Vec<Option<f64>>, ElementError> {
        self.values
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                other => other.as_f64().map(Some).ok_or_else(|| self.not_numeric(other)),
            })
            .collect()
    }

    /// Sum over all rows, skipping nulls.
    pub fn sum(&self) -> Result<f64, ElementError> {
        Ok(self.numbers()?.into_iter().flatten().sum())
    }

    pub(crate) fn not_numeric(&self, found: &Value) -> ElementError {
        ElementError::NotNumeric {
            column: self.name.clone(),
            found: found.kind().to_string(),
        }
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// Column-oriented table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Pivot row objects into columns.
    ///
    /// Column order is first-seen key order. Rows missing a key get `Null`.
    /// Columns named like dates or times are coerced to timestamps.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<Column> = Vec::new();

        for (row_idx, row) in rows.into_iter().enumerate() {
            for (key, raw) in row {
                let col_idx = match columns.iter().position(|c| c.name == key) {
                    Some(idx) => idx,
                    None => {
                        columns.push(Column {
                            name: key,
                            values: vec![Value::Null; row_idx],
                        });
                        columns.len() - 1
                    }
                };
                let column = &mut columns[col_idx];
                // Backfill rows that lacked this key.
                column.values.resize(row_idx, Value::Null);
                column.values.push(Value::from_json(raw));
            }
        }

        for column in &mut columns {
            column.values.resize(row_count, Value::Null);
            if temporal::is_temporal_column(&column.name) {
                column.values = std::mem::take(&mut column.values)
                    .into_iter()
                    .map(temporal::coerce)
                    .collect();
            }
        }

        Self {
            columns,
            rows: row_count,
        }
    }

    /// Build from a JSON array of row objects.
    pub fn from_json(value: serde_json::Value) -> Result<Self, TableroError> {
        let serde_json::Value::Array(items) = value else {
            return Err(TableroError::Store(format!(
                "dataset must be an array of rows, got {}",
                json_kind(&value)
            )));
        };

        let rows = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                serde_json::Value::Object(map) => Ok(map),
                other => Err(TableroError::Store(format!(
                    "rows[{}]: expected object, got {}",
                    i,
                    json_kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_rows(rows))
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Result<&Column, ElementError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ElementError::MissingColumn(name.to_string()))
    }

    /// Iterate rows as cell references, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).map(move |r| self.columns.iter().map(|c| &c.values[r]).collect())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> Dataset {
        Dataset::from_json(value).unwrap()
    }

    #[test]
    fn test_pivot_preserves_first_seen_column_order() {
        let data = dataset(json!([
            {"region": "North", "sales": 10},
            {"sales": 20, "region": "South", "extra": true},
        ]));
        let names: Vec<_> = data.column_names().collect();
        assert_eq!(names, vec!["region", "sales", "extra"]);
        assert_eq!(data.row_count(), 2);
    }

    #[test]
    fn test_missing_keys_become_null() {
        let data = dataset(json!([{"a": 1}, {"b": 2}, {"a": 3}]));
        let a = data.column("a").unwrap();
        let b = data.column("b").unwrap();
        assert_eq!(a.values(), &[Value::Number(1.0), Value::Null, Value::Number(3.0)]);
        assert_eq!(b.values(), &[Value::Null, Value::Number(2.0), Value::Null]);
    }

    #[test]
    fn test_nested_values_kept_as_json_text() {
        let data = dataset(json!([{"tags": ["a", "b"]}]));
        assert_eq!(
            data.column("tags").unwrap().values()[0],
            Value::Text(r#"["a","b"]"#.into())
        );
    }

    #[test]
    fn test_temporal_columns_coerced() {
        let data = dataset(json!([
            {"order_date": "2024-01-05", "note": "2024-01-05"},
            {"order_date": "garbage", "note": "garbage"},
        ]));
        let dates = data.column("order_date").unwrap().values();
        assert!(matches!(dates[0], Value::Timestamp(_)));
        assert_eq!(dates[1], Value::Null);
        // Non-temporal columns are left alone.
        assert_eq!(
            data.column("note").unwrap().values()[0],
            Value::Text("2024-01-05".into())
        );
    }

    #[test]
    fn test_sum_skips_nulls_and_counts_bools() {
        let data = dataset(json!([{"v": 10}, {"v": null}, {"v": 2.5}, {"v": true}]));
        assert_eq!(data.column("v").unwrap().sum().unwrap(), 13.5);
    }

    #[test]
    fn test_sum_rejects_text() {
        let data = dataset(json!([{"v": 10}, {"v": "ten"}]));
        assert_eq!(
            data.column("v").unwrap().sum(),
            Err(ElementError::NotNumeric {
                column: "v".into(),
                found: "text".into()
            })
        );
    }

    #[test]
    fn test_missing_column() {
        let data = dataset(json!([{"v": 1}]));
        assert_eq!(
            data.column("w"),
            Err(ElementError::MissingColumn("w".into()))
        );
    }

    #[test]
    fn test_rows_iterate_in_column_order() {
        let data = dataset(json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]));
        let rows: Vec<Vec<String>> = data
            .rows()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect();
        assert_eq!(rows, vec![vec!["1", "x"], vec!["2", "y"]]);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Dataset::from_json(json!({"a": 1})).is_err());
        assert!(Dataset::from_json(json!([1, 2])).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let data = dataset(json!([]));
        assert!(data.is_empty());
        assert_eq!(data.columns().len(), 0);
    }

    #[test]
    fn test_timestamps_serialize_as_iso_text() {
        let data = dataset(json!([
            {"order_date": "2024-01-05", "n": 1},
            {"order_date": "garbage", "n": 2}
        ]));
        let cells = serde_json::to_value(data.column("order_date").unwrap().values()).unwrap();
        assert_eq!(cells, json!(["2024-01-05T00:00:00", null]));
    }
}
