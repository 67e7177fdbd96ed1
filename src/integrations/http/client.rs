// src/integrations/http/client.rs
//
// Backend REST Client
//
// ARCHITECTURE:
// - One client per session, shared by reference (Arc<dyn ApiTransport>)
// - Fixed base URL; callers pass paths like "/movies"
// - Bearer token lives on the client, not in a process-wide default
// - Returns parsed JSON or a NetworkError; never retries
//
// SINGLE WRITER:
// - configure_auth is called by the SessionManager only
// - every other service just issues requests

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use super::error::NetworkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The request/response seam every service talks through.
///
/// Implementors only provide `send` and the auth slot; the verb helpers
/// are defaults so test fakes stay small.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Set or clear the bearer token attached to subsequent requests.
    fn configure_auth(&self, token: Option<String>);

    /// The bearer token currently attached, if any.
    fn auth_token(&self) -> Option<String>;

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, NetworkError>;

    async fn get(&self, path: &str) -> Result<Value, NetworkError> {
        self.send(HttpMethod::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, NetworkError> {
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Option<Value>) -> Result<Value, NetworkError> {
        self.send(HttpMethod::Patch, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, NetworkError> {
        self.send(HttpMethod::Delete, path, None).await
    }
}

/// reqwest-backed transport for the streaming backend.
pub struct ReqwestApiClient {
    base_url: String,
    http_client: Client,
    auth_token: RwLock<Option<String>>,
}

impl ReqwestApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::RequestSetup(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            auth_token: RwLock::new(None),
        })
    }

    /// Use a custom reqwest client (connection pool reuse, tests).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiTransport for ReqwestApiClient {
    fn configure_auth(&self, token: Option<String>) {
        let mut slot = self.auth_token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = token;
    }

    fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, NetworkError> {
        let url = self.url_for(path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method.into(), &url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = self.auth_token() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                NetworkError::RequestSetup(e.to_string())
            } else {
                NetworkError::NoResponse(e.to_string())
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| NetworkError::NoResponse(format!("Response body interrupted: {}", e)))?;

        let parsed = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice::<Value>(&bytes)
        };

        if !status.is_success() {
            log::debug!("{} {} -> {}", method, url, status);
            // Error pages are not always JSON; the status alone still classifies them
            return Err(NetworkError::server(
                status.as_u16(),
                parsed.unwrap_or(Value::Null),
            ));
        }

        parsed.map_err(|e| NetworkError::MalformedBody(e.to_string()))
    }
}
