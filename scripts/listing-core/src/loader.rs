//! Dataset loading.
//!
//! The listing export comes out of pandas, so both of its common JSON shapes
//! are accepted:
//! - records: `[{"name": "...", "phone": 2125550100, ...}, ...]`
//! - columns: `{"name": {"0": "...", "1": "..."}, "phone": {...}, ...}`
//!
//! Values are rendered to strings here and nothing else; trimming and
//! missing-value handling belong to the normalizer.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::{ListingError, Result};
use crate::record::{Field, Record};

pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path).map_err(|e| ListingError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| ListingError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(value).map_err(|reason| ListingError::Layout {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!("loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

pub fn parse_records(value: Value) -> std::result::Result<Vec<Record>, String> {
    match value {
        Value::Array(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| match row {
                Value::Object(obj) => Ok(record_from_object(obj)),
                other => Err(format!("row {idx} is not an object: {}", kind(&other))),
            })
            .collect(),
        Value::Object(columns) => from_columns(columns),
        other => Err(format!("expected an array or object, found {}", kind(&other))),
    }
}

fn record_from_object(obj: Map<String, Value>) -> Record {
    let mut record = Record::default();
    for (key, value) in obj {
        if let Some(field) = Field::from_column(&key) {
            record.set(field, render(value));
        }
    }
    record
}

fn from_columns(columns: Map<String, Value>) -> std::result::Result<Vec<Record>, String> {
    let mut rows: IndexMap<String, Record> = IndexMap::new();
    for (column, cells) in columns {
        let Some(field) = Field::from_column(&column) else {
            warn!("ignoring unknown column '{column}'");
            continue;
        };
        let cells = match cells {
            Value::Object(cells) => cells,
            other => {
                return Err(format!(
                    "column '{column}' is not an object of rows: {}",
                    kind(&other)
                ))
            }
        };
        for (row_id, cell) in cells {
            rows.entry(row_id).or_default().set(field, render(cell));
        }
    }
    let mut keyed: Vec<(String, Record)> = rows.into_iter().collect();
    keyed.sort_by(|(a, _), (b, _)| compare_row_ids(a, b));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

// Row ids are usually stringified integers; "10" must sort after "9".
fn compare_row_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn render(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Some(n.to_string())
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.0}")),
                    _ => Some(n.to_string()),
                }
            }
        }
        other => Some(other.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_orientation() {
        let value = json!([
            {"name": "Acme", "phone": 2125550100u64, "zip": "10001", "employees": 4},
            {"name": null, "phone": "(212) 555-0101"}
        ]);
        let records = parse_records(value).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Acme"));
        assert_eq!(records[0].phone.as_deref(), Some("2125550100"));
        assert_eq!(records[1].name, None);
        assert_eq!(records[1].phone.as_deref(), Some("(212) 555-0101"));
    }

    #[test]
    fn columns_orientation_orders_rows_numerically() {
        let value = json!({
            "name": {"0": "A", "10": "K", "2": "C"},
            "zip": {"0": 6010.0, "2": 10001}
        });
        let records = parse_records(value).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![Some("A"), Some("C"), Some("K")]);
        assert_eq!(records[0].zip.as_deref(), Some("6010"));
        assert_eq!(records[2].zip, None);
    }

    #[test]
    fn rejects_scalars() {
        assert!(parse_records(json!(42)).is_err());
        assert!(parse_records(json!([1, 2])).is_err());
    }

    #[test]
    fn load_records_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, ListingError::Json { .. }));
    }
}
