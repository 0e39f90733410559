// src/service/workspaces.rs

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graphql;
use crate::transport::Transport;

use super::boards::BoardSummary;

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
}

pub struct WorkspaceService<T> {
    transport: Arc<T>,
}

impl<T: Transport> WorkspaceService<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            workspaces: Vec<Workspace>,
        }
        let data = self
            .transport
            .execute(graphql::LIST_WORKSPACES, Value::Null)
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.workspaces)
    }

    pub async fn list_workspace_boards(&self, workspace_id: &str) -> Result<Vec<BoardSummary>> {
        if workspace_id.is_empty() {
            return Err(Error::MissingParameter("workspace_id"));
        }
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            boards: Vec<BoardSummary>,
        }
        let data = self
            .transport
            .execute(
                graphql::LIST_WORKSPACE_BOARDS,
                json!({ "workspaceId": workspace_id }),
            )
            .await?;
        let envelope: Envelope = serde_json::from_value(data)?;
        Ok(envelope.boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    #[tokio::test]
    async fn workspaces_parse_from_the_envelope() {
        let svc = WorkspaceService::new(Arc::new(MockTransport::new(vec![json!({
            "workspaces": [{ "id": "ws1", "name": "Main" }],
        })])));
        let workspaces = svc.list_workspaces().await.unwrap();
        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].name, "Main");
    }
}
