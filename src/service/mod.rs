// src/service/mod.rs

pub mod boards;
pub mod items;
pub mod subitems;
pub mod updates;
pub mod users;
pub mod workspaces;

pub use boards::{BoardService, BoardSummary, Group};
pub use items::{ColumnFilter, CreateItemParams, ItemService, UpdateItemParams};
pub use subitems::{CreateSubitemParams, SubitemService};
pub use updates::UpdateService;
pub use users::{User, UserService};
pub use workspaces::{Workspace, WorkspaceService};

use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::graphql;
use crate::item::RawItem;
use crate::schema::Column;
use crate::transport::Transport;

#[derive(Deserialize)]
pub(crate) struct ItemsEnvelope {
    #[serde(default)]
    pub items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct BoardColumnsEnvelope {
    #[serde(default)]
    boards: Vec<BoardColumns>,
}

#[derive(Deserialize)]
struct BoardColumns {
    #[serde(default)]
    columns: Vec<Column>,
}

/// List one board's columns through the transport. An empty list is a valid
/// answer (no columns, or no such board), not an error.
pub(crate) async fn fetch_board_columns<T: Transport>(
    transport: &T,
    board_id: &str,
) -> Result<Vec<Column>> {
    let data = transport
        .execute(graphql::LIST_BOARD_COLUMNS, json!({ "boardId": board_id }))
        .await?;
    let envelope: BoardColumnsEnvelope = serde_json::from_value(data)?;
    Ok(envelope
        .boards
        .into_iter()
        .next()
        .map(|b| b.columns)
        .unwrap_or_default())
}
