// src/service/updates.rs

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graphql;
use crate::transport::Transport;

/// Posts updates (comments) onto items.
pub struct UpdateService<T> {
    transport: Arc<T>,
}

impl<T: Transport> UpdateService<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn create_update(&self, item_id: &str, body: &str) -> Result<String> {
        if item_id.is_empty() {
            return Err(Error::MissingParameter("item_id"));
        }
        if body.is_empty() {
            return Err(Error::MissingParameter("body"));
        }

        #[derive(Deserialize)]
        struct Envelope {
            create_update: Created,
        }
        #[derive(Deserialize)]
        struct Created {
            id: String,
        }

        let data = self
            .transport
            .execute(
                graphql::CREATE_UPDATE,
                json!({ "itemId": item_id, "updateBody": body }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.create_update.id)
    }
}
