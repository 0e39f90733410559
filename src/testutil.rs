// src/testutil.rs

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Replays canned `data` payloads in order and records every call, so tests
/// can count transport round trips and inspect variables.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Value>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((document.to_string(), variables));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Remote("mock transport ran out of responses".to_string()))
    }
}
