// src/schema.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, RwLock},
};
use tracing::debug;

use crate::column::ColumnType;
use crate::error::{Error, Result};

/// One column definition in a board's schema, as the column-listing query
/// returns it. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Opaque per-type configuration, e.g. subitem board linkage.
    #[serde(default)]
    pub settings_str: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lookup used by the encoder to type-dispatch column ids.
pub fn column_id_type_map(columns: &[Column]) -> HashMap<String, ColumnType> {
    columns
        .iter()
        .map(|c| (c.id.clone(), c.column_type))
        .collect()
}

/// Per-board memo of the column schema, fetched lazily and kept until the
/// owner invalidates it. Owned by one service instance; no TTL.
///
/// Concurrent cold lookups for the same board may each fetch; the last insert
/// wins, and both fetches see the same server-side schema.
pub struct SchemaCache {
    boards: RwLock<HashMap<String, Arc<Vec<Column>>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self {
            boards: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, board_id: &str) -> Option<Arc<Vec<Column>>> {
        self.boards.read().unwrap().get(board_id).map(Arc::clone)
    }

    pub fn insert(&self, board_id: &str, columns: Vec<Column>) -> Arc<Vec<Column>> {
        let columns = Arc::new(columns);
        self.boards
            .write()
            .unwrap()
            .insert(board_id.to_string(), Arc::clone(&columns));
        columns
    }

    /// Return the cached columns for `board_id`, running `fetch` to populate
    /// the entry on a miss.
    pub async fn get_or_fetch<F, Fut>(&self, board_id: &str, fetch: F) -> Result<Arc<Vec<Column>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Column>>>,
    {
        if let Some(columns) = self.get(board_id) {
            return Ok(columns);
        }
        debug!(board_id, "schema cache miss, fetching columns");
        let columns = fetch().await?;
        Ok(self.insert(board_id, columns))
    }

    /// Drop one board's entry, or every entry when no id is given.
    pub fn invalidate(&self, board_id: Option<&str>) {
        let mut boards = self.boards.write().unwrap();
        match board_id {
            Some(id) => {
                boards.remove(id);
            }
            None => boards.clear(),
        }
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SubtasksSettings {
    #[serde(default, rename = "boardIds")]
    board_ids: Vec<Value>,
}

/// Resolve the board that holds a board's subitems from its subitem-link
/// column settings. Fatal when no such column is configured: subitem writes
/// cannot proceed without the destination schema.
pub fn subitem_board_id(board_id: &str, columns: &[Column]) -> Result<String> {
    let unresolved = || Error::UnresolvedSubitemBoard {
        board_id: board_id.to_string(),
    };
    let settings = columns
        .iter()
        .find(|c| c.column_type == ColumnType::Subtasks)
        .and_then(|c| c.settings_str.as_deref())
        .ok_or_else(unresolved)?;
    let settings: SubtasksSettings = serde_json::from_str(settings).map_err(|_| unresolved())?;
    match settings.board_ids.into_iter().next() {
        Some(Value::String(id)) => Ok(id),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(unresolved()),
    }
}
