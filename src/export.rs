// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::ast::{Document, Table, Value};
use crate::TomletError;

/// Integral numbers serialize as integers so `port = 8080` exports as `8080`,
/// not `8080.0`. Everything else maps one to one, `Null` becoming JSON null.
/// Non-finite numbers have no JSON form and also export as null.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Table(table) => serialize_table(table, serializer),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_table(self.root(), serializer)
    }
}

fn serialize_table<S: Serializer>(table: &Table, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(table.len()))?;
    for (key, value) in table {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// Convert a document into a `serde_json::Value`, preserving key order.
pub fn document_to_json_value(doc: &Document) -> Result<serde_json::Value, TomletError> {
    serde_json::to_value(doc).map_err(|e| TomletError::Export {
        message: format!("Failed to convert document: {}", e),
        code: Some(501),
    })
}

/// Export a document as pretty-printed JSON.
///
/// # Examples
/// ```
/// let doc = tomlet::parse("[site]\ntitle = \"Demo\"");
/// let json = tomlet::export::export_document_to_json(&doc).unwrap();
/// assert!(json.contains("\"title\": \"Demo\""));
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String, TomletError> {
    serde_json::to_string_pretty(doc).map_err(|e| TomletError::Export {
        message: format!("Failed to serialize document: {}", e),
        code: Some(501),
    })
}

/// Read, parse (leniently) and export a file in one call.
///
/// # Errors
/// Returns an error only if the file cannot be read.
pub fn export_file<P: AsRef<Path>>(path: P) -> Result<String, TomletError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|e| TomletError::File {
        message: format!("Failed to read file: {}", e),
        path: path.display().to_string(),
        hint: None,
        code: Some(500),
    })?;
    export_document_to_json(&crate::parse(&input))
}
