// src/service/boards.rs

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::column::ColumnType;
use crate::error::{Error, Result};
use crate::graphql;
use crate::item::{transform_items, ItemValues, ItemsPage};
use crate::page;
use crate::schema::Column;
use crate::transport::Transport;

use super::fetch_board_columns;

#[derive(Debug, Clone, Deserialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub items_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
}

/// Board-level reads plus the group/column creation mutations.
pub struct BoardService<T> {
    transport: Arc<T>,
}

impl<T: Transport> BoardService<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn list_boards(&self) -> Result<Vec<BoardSummary>> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            boards: Vec<BoardSummary>,
        }
        let data = self
            .transport
            .execute(graphql::LIST_BOARDS, Value::Null)
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.boards)
    }

    pub async fn list_board_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        if board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }
        fetch_board_columns(self.transport.as_ref(), board_id).await
    }

    pub async fn list_board_groups(&self, board_id: &str) -> Result<Vec<Group>> {
        if board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }

        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            boards: Vec<BoardGroups>,
        }
        #[derive(Deserialize)]
        struct BoardGroups {
            #[serde(default)]
            groups: Vec<Group>,
        }

        let data = self
            .transport
            .execute(graphql::LIST_BOARD_GROUPS, json!({ "boardId": board_id }))
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope
            .boards
            .into_iter()
            .next()
            .map(|b| b.groups)
            .unwrap_or_default())
    }

    /// List a board's items, decoded. With `all` set, cursor pagination runs
    /// until the server stops returning a cursor; otherwise only the first
    /// page is returned.
    pub async fn list_board_items(
        &self,
        board_id: &str,
        column_ids: Option<&[String]>,
        all: bool,
    ) -> Result<Vec<ItemValues>> {
        if board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }
        if all {
            return page::fetch_all_items(self.transport.as_ref(), board_id, column_ids).await;
        }

        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            boards: Vec<BoardItems>,
        }
        #[derive(Deserialize)]
        struct BoardItems {
            #[serde(default)]
            items_page: Option<ItemsPage>,
        }

        let data = self
            .transport
            .execute(
                graphql::LIST_BOARD_ITEMS,
                json!({ "boardId": board_id, "columnIds": column_ids }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        let items = envelope
            .boards
            .into_iter()
            .next()
            .and_then(|b| b.items_page)
            .unwrap_or_default()
            .items;
        transform_items(&items)
    }

    pub async fn create_group(&self, board_id: &str, group_name: &str) -> Result<String> {
        if board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }
        if group_name.is_empty() {
            return Err(Error::MissingParameter("group_name"));
        }

        #[derive(Deserialize)]
        struct Envelope {
            create_group: Created,
        }
        #[derive(Deserialize)]
        struct Created {
            id: String,
        }

        let data = self
            .transport
            .execute(
                graphql::CREATE_GROUP,
                json!({ "boardId": board_id, "groupName": group_name }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.create_group.id)
    }

    pub async fn create_column(
        &self,
        board_id: &str,
        title: &str,
        column_type: ColumnType,
    ) -> Result<String> {
        if board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }
        if title.is_empty() {
            return Err(Error::MissingParameter("column_title"));
        }

        #[derive(Deserialize)]
        struct Envelope {
            create_column: Created,
        }
        #[derive(Deserialize)]
        struct Created {
            id: String,
        }

        let data = self
            .transport
            .execute(
                graphql::CREATE_COLUMN,
                json!({
                    "boardId": board_id,
                    "columnTitle": title,
                    "columnType": column_type,
                }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.create_column.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    fn service(responses: Vec<Value>) -> BoardService<MockTransport> {
        BoardService::new(Arc::new(MockTransport::new(responses)))
    }

    #[tokio::test]
    async fn list_board_columns_unwraps_the_board_envelope() {
        let svc = service(vec![json!({ "boards": [{ "columns": [
            {"id": "status1", "title": "Status", "type": "status"},
        ]}]})]);

        let columns = svc.list_board_columns("board1").await.unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].column_type, ColumnType::Status);
    }

    #[tokio::test]
    async fn missing_board_lists_no_columns() {
        let svc = service(vec![json!({ "boards": [] })]);
        assert!(svc.list_board_columns("board1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_board_items_single_page() {
        let svc = service(vec![json!({ "boards": [{ "items_page": {
            "cursor": "ignored-on-single-page",
            "items": [{ "id": "1", "name": "only", "column_values": [] }],
        }}]})]);

        let items = svc.list_board_items("board1", None, false).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(svc.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn list_board_groups_requires_a_board_id() {
        let svc = service(vec![]);
        let err = svc.list_board_groups("").await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("board_id")));
        assert_eq!(svc.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn create_group_returns_the_new_id() {
        let svc = service(vec![json!({ "create_group": { "id": "grp7" } })]);
        assert_eq!(svc.create_group("board1", "Backlog").await.unwrap(), "grp7");
    }
}
