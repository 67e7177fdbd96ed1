// src/error/mod.rs

pub mod types;

pub use types::{
    AppError, AppResult, CONNECTIVITY_MESSAGE, INVALID_RESPONSE_MESSAGE,
    SUBSCRIPTION_REQUIRED_MESSAGE,
};

/// True when `body[key]` is the JSON boolean `true`.
pub(crate) fn flag_set(body: &serde_json::Value, key: &str) -> bool {
    body.get(key).and_then(serde_json::Value::as_bool).unwrap_or(false)
}
