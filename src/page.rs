// src/page.rs

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graphql;
use crate::item::{transform_items, ItemValues, ItemsPage};
use crate::transport::Transport;

/// Hard stop for a server that never returns a null cursor.
pub const MAX_PAGES: usize = 1_000;

#[derive(Deserialize)]
struct FirstPageEnvelope {
    #[serde(default)]
    boards: Vec<BoardItemsPage>,
}

#[derive(Deserialize)]
struct BoardItemsPage {
    #[serde(default)]
    items_page: Option<ItemsPage>,
}

#[derive(Deserialize)]
struct NextPageEnvelope {
    #[serde(default)]
    next_items_page: Option<ItemsPage>,
}

/// Fetch every item on a board across however many pages the server needs,
/// decoding each page as it arrives. Pages are strictly sequential: each
/// request carries the cursor from the previous response.
pub async fn fetch_all_items<T: Transport>(
    transport: &T,
    board_id: &str,
    column_ids: Option<&[String]>,
) -> Result<Vec<ItemValues>> {
    fetch_all_items_capped(transport, board_id, column_ids, MAX_PAGES).await
}

async fn fetch_all_items_capped<T: Transport>(
    transport: &T,
    board_id: &str,
    column_ids: Option<&[String]>,
    max_pages: usize,
) -> Result<Vec<ItemValues>> {
    let data = transport
        .execute(
            graphql::LIST_BOARD_ITEMS,
            json!({ "boardId": board_id, "columnIds": column_ids }),
        )
        .await?;
    let first: FirstPageEnvelope = serde_json::from_value(data)?;
    let page = first
        .boards
        .into_iter()
        .next()
        .and_then(|b| b.items_page)
        .unwrap_or_default();

    let mut all = transform_items(&page.items)?;
    let mut cursor = page.cursor;
    let mut pages = 1;

    while let Some(token) = cursor {
        if pages >= max_pages {
            return Err(Error::PageLimitExceeded {
                board_id: board_id.to_string(),
                pages,
            });
        }
        pages += 1;
        debug!(board_id, page = pages, "fetching next items page");
        let data = transport
            .execute(
                graphql::LIST_NEXT_ITEMS,
                json!({ "cursor": token, "columnIds": column_ids }),
            )
            .await?;
        let next: NextPageEnvelope = serde_json::from_value(data)?;
        let page = next.next_items_page.unwrap_or_default();
        all.extend(transform_items(&page.items)?);
        cursor = page.cursor;
    }

    debug!(board_id, pages, items = all.len(), "assembled full item set");
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;
    use serde_json::Value;

    fn item(id: &str) -> Value {
        json!({ "id": id, "name": format!("item {id}"), "column_values": [] })
    }

    fn first_page(items: Vec<Value>, cursor: Option<&str>) -> Value {
        json!({ "boards": [{ "items_page": { "cursor": cursor, "items": items } }] })
    }

    fn next_page(items: Vec<Value>, cursor: Option<&str>) -> Value {
        json!({ "next_items_page": { "cursor": cursor, "items": items } })
    }

    #[tokio::test]
    async fn two_pages_assemble_in_order_with_two_calls() {
        let transport = MockTransport::new(vec![
            first_page(vec![item("1"), item("2"), item("3")], Some("abc")),
            next_page(vec![item("4"), item("5")], None),
        ]);

        let items = fetch_all_items(&transport, "board1", None).await.unwrap();

        assert_eq!(items.len(), 5);
        let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(transport.call_count(), 2);

        // The second request must carry the first page's cursor.
        let calls = transport.calls();
        assert_eq!(calls[1].1["cursor"], json!("abc"));
    }

    #[tokio::test]
    async fn single_page_stops_at_the_null_cursor() {
        let transport = MockTransport::new(vec![first_page(vec![item("1")], None)]);
        let items = fetch_all_items(&transport, "board1", None).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_board_yields_an_empty_set() {
        let transport = MockTransport::new(vec![json!({ "boards": [] })]);
        let items = fetch_all_items(&transport, "board1", None).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn a_cursor_that_never_ends_hits_the_page_cap() {
        let transport = MockTransport::new(vec![
            first_page(vec![item("1")], Some("abc")),
            next_page(vec![item("2")], Some("def")),
            next_page(vec![item("3")], Some("ghi")),
        ]);

        let err = fetch_all_items_capped(&transport, "board1", None, 3)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PageLimitExceeded { pages: 3, .. }));
        assert_eq!(transport.call_count(), 3);
    }
}
