// src/column/decode.rs

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};

use super::types::{ColumnType, RawColumnValue};

// Inner shapes of the JSON-encoded `value` string, parsed once at the
// boundary. Every field defaults so a sparse payload never fails.

#[derive(Deserialize)]
struct CheckboxInner {
    #[serde(default)]
    checked: Option<Value>,
}

#[derive(Deserialize)]
struct ColorPickerInner {
    #[serde(default)]
    color: Option<ColorInner>,
}

#[derive(Deserialize)]
struct ColorInner {
    #[serde(default)]
    hex: Option<String>,
}

#[derive(Deserialize)]
struct CountryInner {
    #[serde(default, rename = "countryName")]
    country_name: Option<String>,
}

#[derive(Deserialize)]
struct CreationLogInner {
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct DateInner {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
}

#[derive(Deserialize)]
struct EmailInner {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct FilesInner {
    #[serde(default)]
    files: Vec<FileInner>,
}

#[derive(Deserialize)]
struct FileInner {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "assetId")]
    asset_id: Option<String>,
    #[serde(default, rename = "fileId")]
    file_id: Option<String>,
    #[serde(default, rename = "linkToFile")]
    link_to_file: Option<String>,
}

#[derive(Deserialize)]
struct LinkInner {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct LongTextInner {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct PeopleInner {
    #[serde(default, rename = "personsAndTeams")]
    persons_and_teams: Vec<PersonInner>,
}

#[derive(Deserialize)]
struct PersonInner {
    id: Value,
}

#[derive(Deserialize)]
struct PhoneInner {
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Deserialize)]
struct RatingInner {
    #[serde(default)]
    rating: Option<Value>,
}

#[derive(Deserialize)]
struct TimelineInner {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
}

#[derive(Deserialize)]
struct TimeTrackingInner {
    #[serde(default)]
    duration: Option<Value>,
}

fn is_empty(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(s) => s.is_empty() || s == "null",
    }
}

/// Parse the inner value string into a typed record. Empty and malformed
/// payloads both come back as `None`; decode never fails on them.
fn inner<T: DeserializeOwned>(raw: &RawColumnValue) -> Option<T> {
    if is_empty(&raw.value) {
        return None;
    }
    serde_json::from_str(raw.value.as_deref()?).ok()
}

fn string_or_null(s: &Option<String>) -> Value {
    s.as_deref().map_or(Value::Null, |s| json!(s))
}

/// `checked` arrives as bool on newer payloads and as `"true"`/`"false"`
/// strings on older ones.
fn checked_flag(v: Option<Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

fn coerce_number(v: Value) -> Value {
    match v {
        Value::Number(n) => Value::Number(n),
        Value::String(s) if s.is_empty() => json!(0),
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number),
        Value::Null => json!(0),
        _ => Value::Null,
    }
}

/// Decode one raw column value into its uniform flat representation, keyed by
/// the value's own type tag. Missing or empty inner values decode to the
/// type's empty default; a type with no decode rule is a fatal error.
pub fn decode_column_value(raw: &RawColumnValue) -> Result<Value> {
    let decoded = match raw.column_type {
        ColumnType::Button => string_or_null(&raw.label),
        ColumnType::Checkbox => {
            json!(checked_flag(inner::<CheckboxInner>(raw).and_then(|i| i.checked)))
        }
        ColumnType::ColorPicker => inner::<ColorPickerInner>(raw)
            .and_then(|i| i.color)
            .and_then(|c| c.hex)
            .map_or(Value::Null, |hex| json!(hex)),
        ColumnType::BoardRelation | ColumnType::Dependency => {
            json!(raw.linked_item_ids.clone().unwrap_or_default())
        }
        ColumnType::Country => inner::<CountryInner>(raw)
            .and_then(|i| i.country_name)
            .map_or(Value::Null, |name| json!(name)),
        ColumnType::CreationLog => inner::<CreationLogInner>(raw)
            .and_then(|i| i.created_at)
            .map_or(Value::Null, |at| json!(at)),
        ColumnType::Date => match inner::<DateInner>(raw) {
            None => Value::Null,
            Some(d) => json!({ "date": d.date, "time": d.time }),
        },
        // Labels are intentionally not resolved to ids here.
        ColumnType::Dropdown => match raw.text.as_deref() {
            Some(text) if !text.is_empty() => json!(text),
            _ => Value::Null,
        },
        ColumnType::Email => {
            inner::<EmailInner>(raw).and_then(|i| i.email).map_or(Value::Null, |e| json!(e))
        }
        ColumnType::Files => {
            let files = inner::<FilesInner>(raw).map(|i| i.files).unwrap_or_default();
            Value::Array(
                files
                    .into_iter()
                    .map(|f| {
                        json!({
                            "name": f.name,
                            "assetId": f.asset_id,
                            "fileId": f.file_id,
                            "linkToFile": f.link_to_file,
                        })
                    })
                    .collect(),
            )
        }
        ColumnType::Formula => json!({
            "value": &raw.display_value,
            "formula": raw.column.as_ref().and_then(|c| c.settings_str.clone()),
        }),
        ColumnType::Hour | ColumnType::ItemId | ColumnType::LastUpdated | ColumnType::Location => {
            Value::Null
        }
        ColumnType::Link => {
            inner::<LinkInner>(raw).and_then(|i| i.url).map_or(Value::Null, |u| json!(u))
        }
        ColumnType::LongText => {
            inner::<LongTextInner>(raw).and_then(|i| i.text).map_or(Value::Null, |t| json!(t))
        }
        ColumnType::Mirror => string_or_null(&raw.display_value),
        ColumnType::Doc => inner::<FilesInner>(raw)
            .and_then(|i| i.files.into_iter().next())
            .and_then(|f| f.link_to_file)
            .map_or(Value::Null, |link| json!(link)),
        ColumnType::Numbers => {
            coerce_number(inner::<Value>(raw).unwrap_or(Value::Null))
        }
        ColumnType::People => {
            let people = inner::<PeopleInner>(raw)
                .map(|i| i.persons_and_teams.into_iter().map(|p| p.id).collect())
                .unwrap_or_default();
            Value::Array(people)
        }
        ColumnType::Phone => {
            inner::<PhoneInner>(raw).and_then(|i| i.phone).map_or(Value::Null, |p| json!(p))
        }
        ColumnType::Rating => {
            inner::<RatingInner>(raw).and_then(|i| i.rating).unwrap_or(Value::Null)
        }
        // The label side field, verbatim; the raw JSON is never parsed.
        ColumnType::Status => string_or_null(&raw.label),
        ColumnType::Tags => {
            let names: Vec<&str> = raw
                .tags
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            json!(names)
        }
        ColumnType::Text => inner::<Value>(raw).unwrap_or(Value::Null),
        ColumnType::Timeline => match inner::<TimelineInner>(raw) {
            None => Value::Null,
            Some(t) => json!({ "from": t.from, "to": t.to }),
        },
        ColumnType::TimeTracking => {
            inner::<TimeTrackingInner>(raw).and_then(|i| i.duration).unwrap_or(Value::Null)
        }
        ColumnType::Vote => json!(raw.vote_count.unwrap_or(0)),
        ColumnType::Week => json!({
            "start_date": &raw.start_date,
            "end_date": &raw.end_date,
        }),
        ColumnType::WorldClock => string_or_null(&raw.timezone),
        // No decode rule. Surfacing this loudly beats handing back a value
        // that silently went missing.
        ColumnType::AutoNumber
        | ColumnType::Name
        | ColumnType::Subtasks
        | ColumnType::Unknown => {
            return Err(Error::UnknownColumnType {
                column_id: raw.id.clone(),
            })
        }
    };
    Ok(decoded)
}
