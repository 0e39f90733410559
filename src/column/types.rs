// src/column/types.rs

use serde::{Deserialize, Serialize};

/// Every column type the platform reports. The wire tag is the snake_case
/// variant name; anything the server adds later lands on `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    AutoNumber,
    BoardRelation,
    Button,
    Checkbox,
    ColorPicker,
    Country,
    CreationLog,
    Date,
    Dependency,
    Doc,
    Dropdown,
    Email,
    /// Reported as `file` in board schemas; older value payloads say `files`.
    #[serde(rename = "file", alias = "files")]
    Files,
    Formula,
    Hour,
    ItemId,
    LastUpdated,
    Link,
    Location,
    LongText,
    Mirror,
    Name,
    Numbers,
    People,
    Phone,
    Rating,
    Status,
    Subtasks,
    Tags,
    Text,
    TimeTracking,
    Timeline,
    Vote,
    Week,
    WorldClock,
    #[serde(other)]
    Unknown,
}

impl ColumnType {
    /// Server-computed/derived types the write mutations reject. The encoder
    /// drops these silently instead of sending them.
    pub fn is_writable(self) -> bool {
        !matches!(
            self,
            ColumnType::AutoNumber
                | ColumnType::Button
                | ColumnType::CreationLog
                | ColumnType::Formula
                | ColumnType::ItemId
                | ColumnType::LastUpdated
                | ColumnType::Mirror
                | ColumnType::Subtasks
                | ColumnType::TimeTracking
                | ColumnType::Vote
                | ColumnType::Unknown
        )
    }
}

/// One column's value on one item, exactly as the column-values fragment
/// returns it: `value` is a JSON-encoded string (or null) whose inner shape
/// depends on the type, and several types surface side fields next to it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawColumnValue {
    pub id: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Side field on button and status values.
    #[serde(default)]
    pub label: Option<String>,
    /// Side field on mirror and formula values.
    #[serde(default)]
    pub display_value: Option<String>,
    /// Side field on board-relation and dependency values.
    #[serde(default)]
    pub linked_item_ids: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<TagRef>>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    /// Week values report their range outside `value`.
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Formula values expose their column settings alongside the value.
    #[serde(default)]
    pub column: Option<ColumnSettingsRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSettingsRef {
    #[serde(default)]
    pub settings_str: Option<String>,
}

impl RawColumnValue {
    /// A bare value for tests and callers that only have id/type/value.
    pub fn new(
        id: impl Into<String>,
        column_type: ColumnType,
        value: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column_type,
            value,
            text: None,
            label: None,
            display_value: None,
            linked_item_ids: None,
            tags: None,
            vote_count: None,
            start_date: None,
            end_date: None,
            timezone: None,
            column: None,
        }
    }
}
