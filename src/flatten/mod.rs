//! Turns a decoded JSON response into a header row plus equally sized data
//! rows.

mod selection;

pub use selection::{FieldSpec, COLUMN_SEPARATOR, PATH_SEPARATOR};

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

/// Key used for array elements that are not objects.
pub const SCALAR_COLUMN: &str = "value";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decodes a response body into records. A top-level array yields one record
/// per element; anything else is a single record.
pub fn decode_records(body: &[u8]) -> Result<Vec<Value>> {
    let document: Value =
        serde_json::from_slice(body).context("decoding JSON response body")?;

    let records = match document {
        Value::Array(items) => items.into_iter().map(into_record).collect(),
        other => vec![into_record(other)],
    };
    Ok(records)
}

fn into_record(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        other => {
            let mut map = Map::new();
            map.insert(SCALAR_COLUMN.to_string(), other);
            Value::Object(map)
        }
    }
}

pub fn flatten_records(records: &[Value], fields: &[FieldSpec]) -> Table {
    if fields.is_empty() {
        flatten_all(records)
    } else {
        flatten_selected(records, fields)
    }
}

fn flatten_selected(records: &[Value], fields: &[FieldSpec]) -> Table {
    let header = fields.iter().map(FieldSpec::column_name).collect();
    let rows = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| field.lookup(record).map(render_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Table { header, rows }
}

fn flatten_all(records: &[Value]) -> Table {
    let flattened: Vec<IndexMap<String, String>> = records
        .iter()
        .map(|record| {
            let mut cells = IndexMap::new();
            if let Value::Object(map) = record {
                flatten_object(None, map, &mut cells);
            }
            cells
        })
        .collect();

    let header: IndexSet<String> = flattened
        .iter()
        .flat_map(|cells| cells.keys().cloned())
        .collect();

    let rows = flattened
        .iter()
        .map(|cells| {
            header
                .iter()
                .map(|column| cells.get(column).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Table {
        header: header.into_iter().collect(),
        rows,
    }
}

fn flatten_object(
    prefix: Option<&str>,
    map: &Map<String, Value>,
    cells: &mut IndexMap<String, String>,
) {
    for (key, value) in map {
        let column = match prefix {
            Some(prefix) => format!("{prefix}{COLUMN_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => {
                flatten_object(Some(&column), inner, cells)
            }
            other => {
                let column = unique_column(cells, column);
                cells.insert(column, render_cell(other));
            }
        }
    }
}

/// `{"a_b": 1, "a": {"b": 2}}` flattens to `a_b` and `a_b_2`.
fn unique_column(cells: &IndexMap<String, String>, column: String) -> String {
    let mut candidate = column.clone();
    let mut suffix = 2;
    while cells.contains_key(&candidate) {
        candidate = format!("{column}{COLUMN_SEPARATOR}{suffix}");
        suffix += 1;
    }
    candidate
}

/// Null, arrays and nested objects render as an empty cell. Floats print as
/// plain decimals, never in exponent form.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_i64() || number.is_u64() => number.to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(|float| float.to_string())
            .unwrap_or_else(|| number.to_string()),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
