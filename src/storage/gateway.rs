//! Query gateway: generic read and write statements against the store.
//!
//! Every statement takes its inputs as bound parameters. Nothing here (or
//! anywhere else in the storage layer) formats caller values into SQL text.

use super::schema::FoodDatabase;
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::Params;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Result set of a read statement with its column names preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column`, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Value at (`row`, `column`).
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, column: &str) -> Vec<&Value> {
        match self.column_index(column) {
            Some(idx) => self.rows.iter().filter_map(|r| r.get(idx)).collect(),
            None => Vec::new(),
        }
    }

    /// Rows as JSON objects keyed by column name.
    pub fn records(&self) -> Vec<Map<String, JsonValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(value_to_json))
                    .collect()
            })
            .collect()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let records = self.records();
        let mut seq = serializer.serialize_seq(Some(records.len()))?;
        for record in &records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

/// Convert a SQLite value to JSON. Blobs become arrays of bytes.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Integer(i) => JsonValue::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Blob(b) => JsonValue::from(b.clone()),
    }
}

/// Render a SQLite value for plain-text output.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{:.2}", f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

impl FoodDatabase {
    /// Run a read statement and collect every row, including zero rows.
    pub fn query<P: Params>(&self, sql: &str, params: P) -> Result<Table> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();

        let mut rows = stmt.query(params)?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(row.get::<_, Value>(idx)?);
            }
            collected.push(values);
        }

        Ok(Table {
            columns,
            rows: collected,
        })
    }

    /// Run a write statement. The connection is in autocommit mode, so the
    /// change is committed when this returns. Returns the affected row count.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }
}
