//! Async client for the Workdeck work-management GraphQL API.
//!
//! Boards carry a per-board column schema that is only known at runtime, and
//! every column type has its own wire representation (JSON-encoded strings
//! with type-specific inner shapes). This crate centers on the machinery that
//! bridges that: a per-type codec ([`column`]), a schema-aware write encoder
//! ([`encode`]) backed by a lazy per-board cache ([`schema`]), an item
//! decoder ([`item`]), and a cursor-pagination driver ([`page`]). The
//! [`service`] modules wrap the fixed query/mutation documents on top.
//!
//! ```no_run
//! use workdeck::Client;
//!
//! # async fn run() -> workdeck::Result<()> {
//! let client = Client::new("api-key");
//! let items = client.boards.list_board_items("4321", None, true).await?;
//! for item in &items {
//!     println!("{}", item["name"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod encode;
pub mod error;
pub mod graphql;
pub mod item;
pub mod page;
pub mod schema;
pub mod service;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use column::{decode_column_value, encode_column_value, ColumnType, RawColumnValue};
pub use encode::{encode_column_values, EncodedColumnValues};
pub use error::{Error, Result};
pub use item::{transform_item, transform_items, ItemValues, RawItem};
pub use schema::{Column, SchemaCache};
pub use transport::{GraphQlTransport, Transport};

use std::sync::Arc;

/// Entry point bundling every service over one shared transport.
pub struct Client<T = GraphQlTransport> {
    pub items: service::ItemService<T>,
    pub boards: service::BoardService<T>,
    pub subitems: service::SubitemService<T>,
    pub users: service::UserService<T>,
    pub workspaces: service::WorkspaceService<T>,
    pub updates: service::UpdateService<T>,
}

impl Client<GraphQlTransport> {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(GraphQlTransport::new(api_key))
    }
}

impl<T: Transport> Client<T> {
    /// Build a client over any transport, e.g. a recording one in tests.
    pub fn with_transport(transport: T) -> Self {
        let transport = Arc::new(transport);
        Self {
            items: service::ItemService::new(Arc::clone(&transport)),
            boards: service::BoardService::new(Arc::clone(&transport)),
            subitems: service::SubitemService::new(Arc::clone(&transport)),
            users: service::UserService::new(Arc::clone(&transport)),
            workspaces: service::WorkspaceService::new(Arc::clone(&transport)),
            updates: service::UpdateService::new(transport),
        }
    }
}
