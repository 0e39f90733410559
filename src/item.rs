// src/item.rs

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::column::{decode_column_value, RawColumnValue};
use crate::error::Result;

/// One item as the item queries return it. `subitems` is only populated by
/// the subitem listing query.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub board: Option<BoardRef>,
    #[serde(default)]
    pub column_values: Vec<RawColumnValue>,
    #[serde(default)]
    pub subitems: Option<Vec<RawItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardRef {
    pub id: String,
}

/// One page of items plus the cursor for the next one, shared by the
/// first-page and next-page query envelopes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemsPage {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// Flat column-id → decoded-value map for one item, with synthetic `id` and
/// `name` keys. The only item representation application code should use.
pub type ItemValues = Map<String, Value>;

/// Decode a raw item into its flat value map. Each column value is decoded by
/// its own type tag; the schema is not consulted.
pub fn transform_item(item: &RawItem) -> Result<ItemValues> {
    let mut values = Map::new();
    values.insert("id".to_string(), json!(item.id));
    values.insert("name".to_string(), json!(item.name));
    for column_value in &item.column_values {
        values.insert(column_value.id.clone(), decode_column_value(column_value)?);
    }
    Ok(values)
}

pub fn transform_items(items: &[RawItem]) -> Result<Vec<ItemValues>> {
    items.iter().map(transform_item).collect()
}
