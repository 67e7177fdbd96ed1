// src/integrations/http/error.rs
//
// Transport-level failures. Kept separate from AppError so the adapter
// never decides what a failure *means* to a caller.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// The request left the device but nothing came back
    /// (connection refused, DNS failure, timeout).
    #[error("No response from server: {0}")]
    NoResponse(String),

    /// The server answered with a non-2xx status.
    #[error("Server error {status}: {message}")]
    ServerError {
        status: u16,
        message: String,
        body: Value,
    },

    /// The request could not be built (bad URL, bad header value).
    #[error("Request setup failed: {0}")]
    RequestSetup(String),

    /// A 2xx response whose body is not JSON.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

impl NetworkError {
    /// Build a `ServerError`, extracting the message the backend put in the body.
    ///
    /// Precedence: `message`, then `error`, then `"Server error: <status>"`.
    pub fn server(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| body.get("error").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Server error: {}", status));

        NetworkError::ServerError {
            status,
            message,
            body,
        }
    }

    /// HTTP status if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
