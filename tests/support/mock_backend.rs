use picto_search::api::{ClientError, SearchBackend};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory search backend
///
/// Answers each query with a canned payload, or a 500 when the query was
/// registered as failing. Records every call.
#[derive(Default)]
pub struct MockSearchBackend {
    responses: Mutex<HashMap<String, Result<Value, String>>>,
    calls: Mutex<Vec<String>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, query: &str, payload: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(payload));
    }

    pub fn fail(&self, query: &str, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(body.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search_images(&self, query: &str) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(query.to_string());

        match self.responses.lock().unwrap().get(query).cloned() {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(body)) => Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body,
            }),
            None => Ok(Value::Array(Vec::new())),
        }
    }
}
