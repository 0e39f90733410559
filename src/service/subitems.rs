// src/service/subitems.rs

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::encode::{encode_column_values, EncodedColumnValues};
use crate::error::{Error, Result};
use crate::graphql;
use crate::item::{transform_items, ItemValues};
use crate::schema::{subitem_board_id, SchemaCache};
use crate::transport::Transport;

use super::{fetch_board_columns, ItemsEnvelope};

#[derive(Debug, Clone, Default)]
pub struct CreateSubitemParams {
    pub parent_item_id: String,
    pub item_name: String,
    pub column_values: Map<String, Value>,
    pub create_labels: bool,
}

/// Subitem reads and writes. Writes need a two-step schema resolution: the
/// parent item's board names the subitem board, and only that board's schema
/// can validate the payload.
pub struct SubitemService<T> {
    transport: Arc<T>,
    schema: SchemaCache,
}

impl<T: Transport> SubitemService<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            schema: SchemaCache::new(),
        }
    }

    pub async fn list_subitems(
        &self,
        parent_item_id: &str,
        column_ids: Option<&[String]>,
    ) -> Result<Vec<ItemValues>> {
        if parent_item_id.is_empty() {
            return Err(Error::MissingParameter("parent_item_id"));
        }
        let data = self
            .transport
            .execute(
                graphql::LIST_SUBITEMS,
                json!({ "itemId": parent_item_id, "columnIds": column_ids }),
            )
            .await?;
        let envelope: ItemsEnvelope = serde_json::from_value(data)?;
        let subitems = envelope
            .items
            .into_iter()
            .next()
            .and_then(|item| item.subitems)
            .unwrap_or_default();
        transform_items(&subitems)
    }

    pub async fn create_subitem(&self, params: CreateSubitemParams) -> Result<String> {
        if params.parent_item_id.is_empty() {
            return Err(Error::MissingParameter("parent_item_id"));
        }
        if params.item_name.is_empty() {
            return Err(Error::MissingParameter("item_name"));
        }

        let encoded = self
            .encode_column_values(&params.parent_item_id, &params.column_values)
            .await?;

        #[derive(Deserialize)]
        struct Envelope {
            create_subitem: Created,
        }
        #[derive(Deserialize)]
        struct Created {
            id: String,
        }

        let data = self
            .transport
            .execute(
                graphql::CREATE_SUBITEM,
                json!({
                    "parentItemId": params.parent_item_id,
                    "itemName": params.item_name,
                    "columnValues": serde_json::to_string(&encoded.values)?,
                    "createLabels": params.create_labels,
                }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        debug!(subitem_id = %envelope.create_subitem.id, "created subitem");
        Ok(envelope.create_subitem.id)
    }

    /// Validate and encode a field map against the subitem board's schema,
    /// resolving that board from the parent item first. An empty map
    /// short-circuits before any fetch.
    pub async fn encode_column_values(
        &self,
        parent_item_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<EncodedColumnValues> {
        if fields.is_empty() {
            return Ok(EncodedColumnValues::default());
        }
        let parent_board_id = self.parent_board_id(parent_item_id).await?;
        let parent_columns = self
            .schema
            .get_or_fetch(&parent_board_id, || {
                fetch_board_columns(self.transport.as_ref(), &parent_board_id)
            })
            .await?;
        let board_id = subitem_board_id(&parent_board_id, &parent_columns)?;
        debug!(%parent_board_id, %board_id, "resolved subitem board");
        let columns = self
            .schema
            .get_or_fetch(&board_id, || {
                fetch_board_columns(self.transport.as_ref(), &board_id)
            })
            .await?;
        Ok(encode_column_values(&columns, fields))
    }

    pub fn invalidate_schema(&self, board_id: Option<&str>) {
        self.schema.invalidate(board_id);
    }

    async fn parent_board_id(&self, parent_item_id: &str) -> Result<String> {
        let data = self
            .transport
            .execute(graphql::GET_ITEM_BOARD, json!({ "itemId": parent_item_id }))
            .await?;
        let envelope: ItemsEnvelope = serde_json::from_value(data)?;
        envelope
            .items
            .into_iter()
            .next()
            .and_then(|item| item.board)
            .map(|board| board.id)
            .ok_or_else(|| Error::ItemNotFound {
                item_id: parent_item_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    fn service(responses: Vec<Value>) -> SubitemService<MockTransport> {
        SubitemService::new(Arc::new(MockTransport::new(responses)))
    }

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn parent_item_response() -> Value {
        json!({ "items": [{ "id": "77", "name": "parent", "board": { "id": "board1" } }] })
    }

    fn parent_columns_response() -> Value {
        json!({ "boards": [{ "columns": [
            {"id": "status1", "title": "Status", "type": "status"},
            {"id": "subitems1", "title": "Subitems", "type": "subtasks",
             "settings_str": r#"{"boardIds":[4567]}"#},
        ]}]})
    }

    fn subitem_columns_response() -> Value {
        json!({ "boards": [{ "columns": [
            {"id": "text3", "title": "Notes", "type": "text"},
        ]}]})
    }

    #[tokio::test]
    async fn list_subitems_decodes_the_nested_items() {
        let svc = service(vec![json!({ "items": [{
            "id": "77",
            "name": "parent",
            "subitems": [
                { "id": "78", "name": "child", "column_values": [
                    {"id": "text3", "type": "text", "value": r#""note""#},
                ]},
            ],
        }]})]);

        let subitems = svc.list_subitems("77", None).await.unwrap();
        assert_eq!(subitems.len(), 1);
        assert_eq!(subitems[0]["name"], json!("child"));
        assert_eq!(subitems[0]["text3"], json!("note"));
    }

    #[tokio::test]
    async fn create_subitem_resolves_the_subitem_board_schema() {
        let svc = service(vec![
            parent_item_response(),
            parent_columns_response(),
            subitem_columns_response(),
            json!({ "create_subitem": { "id": "991", "board": { "id": "4567" } } }),
        ]);

        let id = svc
            .create_subitem(CreateSubitemParams {
                parent_item_id: "77".into(),
                item_name: "child".into(),
                column_values: fields(&[("text3", json!("note"))]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(id, "991");
        assert_eq!(svc.transport.call_count(), 4);

        let calls = svc.transport.calls();
        let sent: Value =
            serde_json::from_str(calls[3].1["columnValues"].as_str().unwrap()).unwrap();
        assert_eq!(sent, json!({ "text3": "note" }));
    }

    #[tokio::test]
    async fn unresolvable_subitem_board_is_fatal() {
        let svc = service(vec![
            parent_item_response(),
            // parent board has no subitem column
            json!({ "boards": [{ "columns": [
                {"id": "status1", "title": "Status", "type": "status"},
            ]}]}),
        ]);

        let err = svc
            .create_subitem(CreateSubitemParams {
                parent_item_id: "77".into(),
                item_name: "child".into(),
                column_values: fields(&[("text3", json!("note"))]),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnresolvedSubitemBoard { board_id } if board_id == "board1"));
    }

    #[tokio::test]
    async fn create_without_fields_skips_schema_resolution() {
        let svc = service(vec![json!({ "create_subitem": { "id": "992" } })]);

        let id = svc
            .create_subitem(CreateSubitemParams {
                parent_item_id: "77".into(),
                item_name: "bare child".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(id, "992");
        assert_eq!(svc.transport.call_count(), 1);
    }
}
