// src/transport.rs

use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.workdeck.com/v2";
pub const DEFAULT_API_VERSION: &str = "2025-04";

/// Executes one GraphQL document and returns the `data` payload. The only
/// seam between the services and the network; tests swap in a recording
/// implementation.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        document: &str,
        variables: Value,
    ) -> impl Future<Output = Result<Value>> + Send;
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// A non-empty error list fails the call with the messages joined; retry
/// policy stays with the caller.
fn into_data(response: GraphQlResponse) -> Result<Value> {
    if !response.errors.is_empty() {
        let joined = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::Remote(joined));
    }
    Ok(response.data.unwrap_or(Value::Null))
}

/// Production transport: reqwest against the platform's GraphQL endpoint,
/// authenticated by API key and pinned to an API version.
pub struct GraphQlTransport {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
}

impl GraphQlTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

impl Transport for GraphQlTransport {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value> {
        debug!(bytes = document.len(), "executing GraphQL document");
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("API-Version", &self.api_version)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;
        let parsed: GraphQlResponse = response.json().await?;
        into_data(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_joined() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "errors": [{"message": "first"}, {"message": "second"}],
        }))
        .unwrap();
        let err = into_data(response).unwrap_err();
        assert!(matches!(err, Error::Remote(msg) if msg == "first, second"));
    }

    #[test]
    fn data_passes_through_when_error_list_is_empty() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": {"items": []},
        }))
        .unwrap();
        assert_eq!(into_data(response).unwrap(), json!({"items": []}));
    }
}
