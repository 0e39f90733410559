// src/encode.rs

use serde_json::{Map, Value};
use tracing::warn;

use crate::column::encode_column_value;
use crate::schema::{column_id_type_map, Column};

/// Result of validating and encoding a caller-supplied field map against a
/// board's schema. `unknown_columns` is the non-fatal warning channel: ids
/// absent from the schema are dropped, never aborting the write.
#[derive(Debug, Default)]
pub struct EncodedColumnValues {
    pub values: Map<String, Value>,
    pub unknown_columns: Vec<String>,
}

fn clears_the_field(value: &Value) -> bool {
    value.is_null() || value.as_str() == Some("")
}

/// Turn an application field map into the `columnValues` mutation payload.
///
/// Keys are partitioned against the schema: unknown ids are dropped with a
/// warning, ids of non-writable (server-computed) types are dropped silently,
/// and empty values encode to `null` as an explicit field clear. The
/// synthetic `id` key is never a column.
pub fn encode_column_values(columns: &[Column], fields: &Map<String, Value>) -> EncodedColumnValues {
    let id_to_type = column_id_type_map(columns);
    let mut encoded = EncodedColumnValues::default();

    for (key, value) in fields {
        if key == "id" {
            continue;
        }
        let Some(&column_type) = id_to_type.get(key) else {
            encoded.unknown_columns.push(key.clone());
            continue;
        };
        if !column_type.is_writable() {
            continue;
        }
        let wire = if clears_the_field(value) {
            Value::Null
        } else {
            encode_column_value(column_type, value)
        };
        encoded.values.insert(key.clone(), wire);
    }

    if !encoded.unknown_columns.is_empty() {
        warn!(
            columns = ?encoded.unknown_columns,
            "dropping column ids not present in the board schema"
        );
    }
    encoded
}
