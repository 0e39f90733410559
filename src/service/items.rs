// src/service/items.rs

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::encode::{encode_column_values, EncodedColumnValues};
use crate::error::{Error, Result};
use crate::graphql;
use crate::item::{transform_items, ItemValues};
use crate::schema::SchemaCache;
use crate::transport::Transport;

use super::{fetch_board_columns, ItemsEnvelope};

#[derive(Debug, Clone, Default)]
pub struct CreateItemParams {
    pub item_name: String,
    pub board_id: String,
    pub group_id: Option<String>,
    pub column_values: Map<String, Value>,
    pub create_labels: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateItemParams {
    pub item_id: String,
    pub board_id: String,
    pub column_values: Map<String, Value>,
    pub create_labels: bool,
}

/// One column filter for the by-column-values item search.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnFilter {
    pub column_id: String,
    pub column_values: Vec<String>,
}

/// Item reads and writes. Owns the board-schema cache that write paths
/// consult; the cache lives and dies with this service instance.
pub struct ItemService<T> {
    transport: Arc<T>,
    schema: SchemaCache,
}

impl<T: Transport> ItemService<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            schema: SchemaCache::new(),
        }
    }

    /// Fetch one item and decode it. The response is a list because the
    /// lookup query is a filtered collection query.
    pub async fn get_item(
        &self,
        item_id: &str,
        column_ids: Option<&[String]>,
    ) -> Result<Vec<ItemValues>> {
        if item_id.is_empty() {
            return Err(Error::MissingParameter("item_id"));
        }
        let data = self
            .transport
            .execute(
                graphql::GET_ITEM,
                json!({ "itemId": item_id, "columnIds": column_ids }),
            )
            .await?;
        let envelope: ItemsEnvelope = serde_json::from_value(data)?;
        transform_items(&envelope.items)
    }

    pub async fn create_item(&self, params: CreateItemParams) -> Result<String> {
        if params.item_name.is_empty() {
            return Err(Error::MissingParameter("item_name"));
        }
        if params.board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }

        let encoded = self
            .encode_column_values(&params.board_id, &params.column_values)
            .await?;

        #[derive(Deserialize)]
        struct Envelope {
            create_item: Created,
        }
        #[derive(Deserialize)]
        struct Created {
            id: String,
        }

        let data = self
            .transport
            .execute(
                graphql::CREATE_ITEM,
                json!({
                    "itemName": params.item_name,
                    "boardId": params.board_id,
                    "groupId": params.group_id,
                    "columnValues": serde_json::to_string(&encoded.values)?,
                    "createLabels": params.create_labels,
                }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        debug!(item_id = %envelope.create_item.id, "created item");
        Ok(envelope.create_item.id)
    }

    pub async fn update_item(&self, params: UpdateItemParams) -> Result<String> {
        if params.item_id.is_empty() {
            return Err(Error::MissingParameter("item_id"));
        }
        if params.board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }

        let encoded = self
            .encode_column_values(&params.board_id, &params.column_values)
            .await?;

        #[derive(Deserialize)]
        struct Envelope {
            change_multiple_column_values: Changed,
        }
        #[derive(Deserialize)]
        struct Changed {
            id: String,
        }

        let data = self
            .transport
            .execute(
                graphql::UPDATE_ITEM,
                json!({
                    "itemId": params.item_id,
                    "boardId": params.board_id,
                    "columnValues": serde_json::to_string(&encoded.values)?,
                    "createLabels": params.create_labels,
                }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.change_multiple_column_values.id)
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<String> {
        if item_id.is_empty() {
            return Err(Error::MissingParameter("item_id"));
        }

        #[derive(Deserialize)]
        struct Envelope {
            delete_item: Deleted,
        }
        #[derive(Deserialize)]
        struct Deleted {
            id: String,
        }

        let data = self
            .transport
            .execute(graphql::DELETE_ITEM, json!({ "itemId": item_id }))
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.delete_item.id)
    }

    pub async fn list_items_by_column_values(
        &self,
        board_id: &str,
        filters: &[ColumnFilter],
        limit: Option<u32>,
        column_ids: Option<&[String]>,
    ) -> Result<Vec<ItemValues>> {
        if board_id.is_empty() {
            return Err(Error::MissingParameter("board_id"));
        }

        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            items_page_by_column_values: Option<Page>,
        }
        #[derive(Deserialize, Default)]
        struct Page {
            #[serde(default)]
            items: Vec<crate::item::RawItem>,
        }

        let data = self
            .transport
            .execute(
                graphql::LIST_ITEMS_BY_COLUMN_VALUES,
                json!({
                    "boardId": board_id,
                    "columns": filters,
                    "limit": limit,
                    "columnIds": column_ids,
                }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        transform_items(&envelope.items_page_by_column_values.unwrap_or_default().items)
    }

    /// Validate and encode a field map against the board's schema. An empty
    /// map short-circuits before any schema fetch.
    pub async fn encode_column_values(
        &self,
        board_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<EncodedColumnValues> {
        if fields.is_empty() {
            return Ok(EncodedColumnValues::default());
        }
        let columns = self
            .schema
            .get_or_fetch(board_id, || {
                fetch_board_columns(self.transport.as_ref(), board_id)
            })
            .await?;
        Ok(encode_column_values(&columns, fields))
    }

    /// Drop the cached schema for one board, or for all boards.
    pub fn invalidate_schema(&self, board_id: Option<&str>) {
        self.schema.invalidate(board_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    fn service(responses: Vec<Value>) -> ItemService<MockTransport> {
        ItemService::new(Arc::new(MockTransport::new(responses)))
    }

    fn board_columns_response() -> Value {
        json!({ "boards": [{ "columns": [
            {"id": "status1", "title": "Status", "type": "status"},
            {"id": "text3", "title": "Notes", "type": "text"},
            {"id": "formula2", "title": "Calc", "type": "formula"},
        ]}]})
    }

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn get_item_requires_an_id_before_any_call() {
        let svc = service(vec![]);
        let err = svc.get_item("", None).await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("item_id")));
        assert_eq!(svc.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn get_item_decodes_the_response() {
        let svc = service(vec![json!({ "items": [{
            "id": "7",
            "name": "first",
            "column_values": [
                {"id": "status1", "type": "status", "value": null, "label": "Working"},
            ],
        }]})]);

        let items = svc.get_item("7", None).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], json!("7"));
        assert_eq!(items[0]["status1"], json!("Working"));
    }

    #[tokio::test]
    async fn empty_field_map_encodes_without_a_schema_fetch() {
        let svc = service(vec![]);
        let encoded = svc.encode_column_values("board1", &Map::new()).await.unwrap();
        assert!(encoded.values.is_empty());
        assert!(encoded.unknown_columns.is_empty());
        assert_eq!(svc.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn create_item_encodes_against_the_schema() {
        let svc = service(vec![
            board_columns_response(),
            json!({ "create_item": { "id": "901" } }),
        ]);

        let id = svc
            .create_item(CreateItemParams {
                item_name: "new item".into(),
                board_id: "board1".into(),
                column_values: fields(&[("status1", json!("Done")), ("ghost9", json!("x"))]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(id, "901");
        assert_eq!(svc.transport.call_count(), 2);

        let calls = svc.transport.calls();
        let sent: Value =
            serde_json::from_str(calls[1].1["columnValues"].as_str().unwrap()).unwrap();
        assert_eq!(sent, json!({ "status1": { "label": "Done" } }));
    }

    #[tokio::test]
    async fn schema_is_fetched_once_across_writes() {
        let svc = service(vec![
            board_columns_response(),
            json!({ "create_item": { "id": "901" } }),
            json!({ "change_multiple_column_values": { "id": "901" } }),
        ]);

        svc.create_item(CreateItemParams {
            item_name: "new item".into(),
            board_id: "board1".into(),
            column_values: fields(&[("text3", json!("a"))]),
            ..Default::default()
        })
        .await
        .unwrap();

        svc.update_item(UpdateItemParams {
            item_id: "901".into(),
            board_id: "board1".into(),
            column_values: fields(&[("text3", json!("b"))]),
            ..Default::default()
        })
        .await
        .unwrap();

        // columns + create + update, no second schema fetch
        assert_eq!(svc.transport.call_count(), 3);
    }

    #[tokio::test]
    async fn invalidate_schema_forces_a_refetch() {
        let svc = service(vec![
            board_columns_response(),
            json!({ "create_item": { "id": "901" } }),
            board_columns_response(),
            json!({ "create_item": { "id": "902" } }),
        ]);

        let params = CreateItemParams {
            item_name: "item".into(),
            board_id: "board1".into(),
            column_values: fields(&[("text3", json!("a"))]),
            ..Default::default()
        };
        svc.create_item(params.clone()).await.unwrap();
        svc.invalidate_schema(Some("board1"));
        svc.create_item(params).await.unwrap();

        assert_eq!(svc.transport.call_count(), 4);
    }

    #[tokio::test]
    async fn search_by_column_values_sends_the_filters() {
        let svc = service(vec![json!({ "items_page_by_column_values": { "items": [
            { "id": "3", "name": "match", "column_values": [] },
        ]}})]);

        let filters = vec![ColumnFilter {
            column_id: "status1".into(),
            column_values: vec!["Done".into()],
        }];
        let items = svc
            .list_items_by_column_values("board1", &filters, Some(25), None)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        let calls = svc.transport.calls();
        assert_eq!(
            calls[0].1["columns"],
            json!([{ "column_id": "status1", "column_values": ["Done"] }])
        );
        assert_eq!(calls[0].1["limit"], json!(25));
    }

    #[tokio::test]
    async fn delete_item_returns_the_deleted_id() {
        let svc = service(vec![json!({ "delete_item": { "id": "55" } })]);
        assert_eq!(svc.delete_item("55").await.unwrap(), "55");
    }

    #[tokio::test]
    async fn update_requires_item_and_board_ids() {
        let svc = service(vec![]);
        let err = svc
            .update_item(UpdateItemParams {
                board_id: "board1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("item_id")));
        assert_eq!(svc.transport.call_count(), 0);
    }
}
