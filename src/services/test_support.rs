// src/services/test_support.rs
//
// Scripted transport for service tests.
//
// Replies are queued per (method, path). A deferred reply hands back a
// oneshot sender so a test decides exactly when (and in which order)
// responses resolve.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::integrations::http::{ApiTransport, HttpMethod, NetworkError};

type Reply = Result<Value, NetworkError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub auth_token: Option<String>,
}

#[derive(Default)]
pub struct FakeTransport {
    auth: Mutex<Option<String>>,
    replies: Mutex<HashMap<(HttpMethod, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: HttpMethod, path: &str, scripted: Scripted) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn reply(&self, method: HttpMethod, path: &str, reply: Reply) {
        self.push(method, path, Scripted::Ready(reply));
    }

    pub fn ok(&self, method: HttpMethod, path: &str, body: Value) {
        self.reply(method, path, Ok(body));
    }

    pub fn fail(&self, method: HttpMethod, path: &str, err: NetworkError) {
        self.reply(method, path, Err(err));
    }

    /// Queue a reply that resolves when the returned sender fires.
    pub fn defer(&self, method: HttpMethod, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    fn configure_auth(&self, token: Option<String>) {
        *self.auth.lock().unwrap() = token;
    }

    fn auth_token(&self) -> Option<String> {
        self.auth.lock().unwrap().clone()
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, NetworkError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
            auth_token: self.auth_token(),
        });

        let scripted = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(NetworkError::NoResponse("reply dropped".to_string()))),
            None => Err(NetworkError::NoResponse(format!(
                "no scripted reply for {} {}",
                method, path
            ))),
        }
    }
}

/// Event type names in emission order.
pub fn emitted(bus: &crate::events::EventBus) -> Vec<String> {
    bus.get_event_log()
        .into_iter()
        .map(|entry| entry.event_type)
        .collect()
}
