//! Mock transport implementations
//!
//! In-memory stand-ins for the remote scheduler service, scriptable
//! per command code, without any network dependency.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use console_dispatcher::CommandTransport;
use console_errors::{ConsoleError, ConsoleResult};
use serde_json::Value;

/// A request as seen by the transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub code: String,
    pub payload: Value,
}

struct ScriptedResponse {
    delay: Option<Duration>,
    result: ConsoleResult<Value>,
}

/// Mock implementation of CommandTransport for testing
///
/// Responses are queued per command code and consumed in order. An
/// exchange with no scripted response fails loudly so a test never
/// silently proceeds on missing setup.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<ScriptedResponse>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, code: &str, value: Value) {
        self.push(code, None, Ok(value));
    }

    pub fn push_delayed_response(&self, code: &str, delay: Duration, value: Value) {
        self.push(code, Some(delay), Ok(value));
    }

    pub fn push_error(&self, code: &str, error: ConsoleError) {
        self.push(code, None, Err(error));
    }

    pub fn push_delayed_error(&self, code: &str, delay: Duration, error: ConsoleError) {
        self.push(code, Some(delay), Err(error));
    }

    fn push(&self, code: &str, delay: Option<Duration>, result: ConsoleResult<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(code.to_string())
            .or_default()
            .push_back(ScriptedResponse { delay, result });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_codes(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.code.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.responses.lock().unwrap().clear();
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl CommandTransport for MockTransport {
    async fn exchange(&self, code: &str, payload: Value) -> ConsoleResult<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            code: code.to_string(),
            payload,
        });

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(code)
            .and_then(|queue| queue.pop_front());

        let Some(scripted) = scripted else {
            return Err(ConsoleError::Internal(format!(
                "no scripted response for command {code}"
            )));
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.result
    }
}

/// A transport that never completes, for timeout tests
#[derive(Debug, Clone, Default)]
pub struct PendingTransport;

#[async_trait]
impl CommandTransport for PendingTransport {
    async fn exchange(&self, _code: &str, _payload: Value) -> ConsoleResult<Value> {
        std::future::pending::<()>().await;
        unreachable!("pending transport never resolves")
    }
}
