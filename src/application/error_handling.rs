// src/application/error_handling.rs
//
// Error Handling for the presentation layer
//
// ARCHITECTURE:
// - Maps internal errors -> user-facing responses
// - Provides a consistent error format for the UI
// - Never exposes storage or transport internals
// - Logs infrastructure errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    /// Show a "try again" affordance
    pub retryable: bool,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Local form input rejected before any request
    Validation,

    /// Credentials rejected by the server
    Authentication,

    /// Request sent, nothing came back
    Connectivity,

    /// Reply missing required fields
    InvalidResponse,

    /// Watch endpoint refused playback
    SubscriptionRequired,

    NotFound,

    /// Local credential storage failed
    Storage,

    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::Validation(message) => Self::new(ErrorType::Validation, message.clone()),

            AppError::Auth(message) => Self::new(ErrorType::Authentication, message.clone()),

            AppError::Connectivity(message) => Self {
                retryable: true,
                ..Self::new(ErrorType::Connectivity, message.clone())
            },

            AppError::ResponseShape(message) => {
                Self::new(ErrorType::InvalidResponse, message.clone())
            }

            AppError::SubscriptionRequired(message) => {
                Self::new(ErrorType::SubscriptionRequired, message.clone())
            }

            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found"),

            AppError::Server { status, message } => {
                let error_type = match status {
                    401 => ErrorType::Authentication,
                    404 => ErrorType::NotFound,
                    _ => ErrorType::Internal,
                };
                Self::new(error_type, message.clone()).with_details(format!("HTTP {}", status))
            }

            AppError::PartialStorage(_) | AppError::Database(_) | AppError::Pool(_) => {
                log::error!("storage error: {:?}", error);
                Self::new(ErrorType::Storage, "Local storage failed")
                    .with_details("Check logs for details")
            }

            AppError::Serialization(_) | AppError::Io(_) | AppError::Other(_) => {
                log::error!("internal error: {:?}", error);
                Self::new(ErrorType::Internal, "Something went wrong. Please try again.")
            }
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self::from_app_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CONNECTIVITY_MESSAGE;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(&AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
    }

    #[test]
    fn test_only_connectivity_is_retryable() {
        let error =
            ErrorResponse::from_app_error(&AppError::Connectivity(CONNECTIVITY_MESSAGE.to_string()));
        assert_eq!(error.error_type, ErrorType::Connectivity);
        assert!(error.retryable);

        let error = ErrorResponse::from_app_error(&AppError::Auth("Nope".to_string()));
        assert_eq!(error.error_type, ErrorType::Authentication);
        assert_eq!(error.message, "Nope");
        assert!(!error.retryable);
    }

    #[test]
    fn test_server_status_mapping() {
        let error = ErrorResponse::from_app_error(&AppError::Server {
            status: 404,
            message: "Movie not found".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.details.as_deref(), Some("HTTP 404"));

        let error = ErrorResponse::from_app_error(&AppError::Server {
            status: 502,
            message: "Bad gateway".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Internal);
        assert_eq!(error.message, "Bad gateway");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let error =
            ErrorResponse::from_app_error(&AppError::PartialStorage("user row corrupt".to_string()));
        assert_eq!(error.error_type, ErrorType::Storage);
        assert!(!error.message.contains("corrupt"));
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(&AppError::SubscriptionRequired(
            "Subscribe".to_string(),
        ));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("subscription_required"));
        assert!(json.contains("\"retryable\":false"));
    }
}
