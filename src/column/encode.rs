// src/column/encode.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use super::types::ColumnType;

/// Parse caller-supplied date input the permissive way: full RFC 3339,
/// a space- or T-separated local datetime, or a bare calendar date.
fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_number(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number),
        _ => Value::Null,
    }
}

/// Encode one application-level value into the wire object the write
/// mutations expect for `column_type`. Types without an encode rule degrade
/// to `null`; the server ignores a null field rather than rejecting the
/// whole mutation.
pub fn encode_column_value(column_type: ColumnType, value: &Value) -> Value {
    match column_type {
        ColumnType::Name | ColumnType::Text => value.clone(),
        // String booleans, matching the platform's historical format.
        ColumnType::Checkbox => {
            json!({ "checked": if is_truthy(value) { "true" } else { "false" } })
        }
        ColumnType::BoardRelation | ColumnType::Dependency => match value {
            Value::Array(ids) => json!({ "item_ids": ids }),
            Value::Null => Value::Null,
            scalar => json!({ "item_ids": [scalar] }),
        },
        ColumnType::Date => match value.as_str().and_then(parse_date_time) {
            Some(dt) => json!({
                "date": dt.format("%Y-%m-%d").to_string(),
                "time": dt.format("%H:%M:%S").to_string(),
            }),
            None => Value::Null,
        },
        ColumnType::Dropdown => match value {
            Value::Array(labels) => json!({ "labels": labels }),
            scalar => json!({ "labels": [scalar] }),
        },
        ColumnType::Email => json!({ "email": value, "text": value }),
        ColumnType::Link => json!({ "url": value, "text": value }),
        ColumnType::Location => {
            let mut parts = value.as_str().unwrap_or_default().splitn(3, ':');
            json!({
                "lat": parts.next().unwrap_or_default(),
                "lng": parts.next().unwrap_or_default(),
                "address": parts.next().unwrap_or_default(),
            })
        }
        ColumnType::LongText => json!({ "text": value }),
        ColumnType::Numbers => coerce_number(value),
        ColumnType::People => {
            let persons: Vec<Value> = match value {
                Value::Array(ids) => ids
                    .iter()
                    .map(|id| json!({ "id": id, "kind": "person" }))
                    .collect(),
                _ => Vec::new(),
            };
            json!({ "personsAndTeams": persons })
        }
        ColumnType::Phone => {
            let mut parts = value.as_str().unwrap_or_default().splitn(2, ':');
            let phone = parts.next().unwrap_or_default();
            json!({
                "phone": format!("+{phone}"),
                "countryShortName": parts.next().unwrap_or("CA"),
            })
        }
        ColumnType::Status => match value {
            Value::Number(index) => json!({ "index": index }),
            label => json!({ "label": label }),
        },
        ColumnType::Timeline => {
            let mut parts = value.as_str().unwrap_or_default().splitn(2, ':');
            let from = parts.next().unwrap_or_default();
            json!({ "from": from, "to": parts.next().unwrap_or(from) })
        }
        _ => Value::Null,
    }
}
