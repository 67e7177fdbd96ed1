// src/services/payload.rs
//
// Envelope helpers for the backend's `{ status, data: { <key>: ... } }` replies.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult, INVALID_RESPONSE_MESSAGE};

fn shape_error() -> AppError {
    AppError::ResponseShape(INVALID_RESPONSE_MESSAGE.to_string())
}

/// `data.<key>` decoded as `T`; missing or mistyped is a shape error.
pub fn data_field<T: DeserializeOwned>(body: &Value, key: &str) -> AppResult<T> {
    let field = body
        .get("data")
        .and_then(|data| data.get(key))
        .filter(|value| !value.is_null())
        .ok_or_else(shape_error)?;

    serde_json::from_value(field.clone()).map_err(|e| {
        log::warn!("data.{} did not decode: {}", key, e);
        shape_error()
    })
}

/// The whole `data` object decoded as `T`.
pub fn data_object<T: DeserializeOwned>(body: &Value) -> AppResult<T> {
    let data = body
        .get("data")
        .filter(|value| value.is_object())
        .ok_or_else(shape_error)?;

    serde_json::from_value(data.clone()).map_err(|e| {
        log::warn!("data did not decode: {}", e);
        shape_error()
    })
}

/// `data.<key>` as a list, skipping entries that fail to decode.
///
/// A missing list is a shape error unless `missing_is_empty` is set.
pub fn data_list<T: DeserializeOwned>(
    body: &Value,
    key: &str,
    missing_is_empty: bool,
) -> AppResult<Vec<T>> {
    let items = match body.get("data").and_then(|data| data.get(key)) {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) if missing_is_empty => return Ok(Vec::new()),
        _ => return Err(shape_error()),
    };

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(value) => decoded.push(value),
            Err(e) => log::warn!("skipping data.{}[{}]: {}", key, index, e),
        }
    }
    Ok(decoded)
}

/// The backend marks a successful mutation with `status: "success"`.
pub fn is_success(body: &Value) -> bool {
    body.get("status").and_then(Value::as_str) == Some("success")
}
