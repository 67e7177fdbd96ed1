// src/error/types.rs
//
// Crate-wide error taxonomy.
//
// Every failure a caller can observe lands in one of these variants:
// - local validation (never touches the network)
// - server-side rejection of credentials
// - connectivity (request sent, nothing came back)
// - response shape (a reply arrived but required fields are missing)
// - subscription gating (the distinct 403 on the watch endpoint)
// - partial credential storage (logged, never shown to the user)
// - infrastructure (database, pool, serialization, io)

use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;
use crate::integrations::http::NetworkError;

/// Message shown when a request was sent but no response arrived.
pub const CONNECTIVITY_MESSAGE: &str =
    "Cannot connect to server. Please check your internet connection.";

/// Message shown when a response is missing the fields we need.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Message shown when the watch endpoint refuses playback.
pub const SUBSCRIPTION_REQUIRED_MESSAGE: &str = "This content requires an active subscription";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Connectivity(String),

    #[error("{0}")]
    ResponseShape(String),

    #[error("{0}")]
    SubscriptionRequired(String),

    #[error("Credential storage error: {0}")]
    PartialStorage(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures the UI should offer a manual retry for.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Connectivity(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<NetworkError> for AppError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::NoResponse(_) => AppError::Connectivity(CONNECTIVITY_MESSAGE.to_string()),
            NetworkError::RequestSetup(message) => AppError::Other(message),
            NetworkError::MalformedBody(_) => {
                AppError::ResponseShape(INVALID_RESPONSE_MESSAGE.to_string())
            }
            NetworkError::ServerError {
                status,
                message,
                body,
            } => {
                if status == 403 && super::flag_set(&body, "requiresSubscription") {
                    AppError::SubscriptionRequired(SUBSCRIPTION_REQUIRED_MESSAGE.to_string())
                } else if status == 401 {
                    AppError::Auth(message)
                } else {
                    AppError::Server { status, message }
                }
            }
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_response_maps_to_connectivity() {
        let err: AppError = NetworkError::NoResponse("connection refused".to_string()).into();
        assert!(matches!(err, AppError::Connectivity(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_403_with_flag_maps_to_subscription_required() {
        let err: AppError =
            NetworkError::server(403, json!({ "requiresSubscription": true })).into();
        assert!(matches!(err, AppError::SubscriptionRequired(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_403_without_flag_stays_generic() {
        let err: AppError = NetworkError::server(403, json!({ "message": "Admins only" })).into();
        match err {
            AppError::Server { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Admins only");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_401_maps_to_auth_with_server_message() {
        let err: AppError =
            NetworkError::server(401, json!({ "message": "Incorrect email or password" })).into();
        assert_eq!(err.to_string(), "Incorrect email or password");
    }
}
