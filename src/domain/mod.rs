// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod download;
pub mod media_url;
pub mod movie;
pub mod playback;
pub mod subscription;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// User & credentials
pub use user::{
    is_valid_email, validate_login, validate_registration, LoginCredentials, RegisterCredentials,
    User, MIN_PASSWORD_LENGTH,
};

// Catalog
pub use catalog::{CatalogSnapshot, GenreBucket, FEATURED_FALLBACK_COUNT, SECTION_CAP, TRENDING_LIMIT};
pub use movie::Movie;

// Media
pub use media_url::MediaUrlResolver;
pub use playback::{clamp_seek, format_time, progress_ratio, SEEK_STEP_MS};

// Subscriptions & downloads
pub use download::Download;
pub use subscription::{
    default_plans, PaymentInitialization, PaymentRequest, SubscriptionPlan, UserSubscription,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent local input that fails before any request is made
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

// ============================================================================
// WIRE HELPERS
// ============================================================================

/// Pick the document id from a record carrying `_id`, `id`, or both.
///
/// Backends that serialize virtuals send both with the same value; `_id`
/// wins when they differ.
pub(crate) fn document_id(
    mongo_id: Option<String>,
    id: Option<String>,
    kind: &str,
) -> Result<String, String> {
    mongo_id
        .or(id)
        .ok_or_else(|| format!("{} record has neither `_id` nor `id`", kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_prefers_mongo_id() {
        let picked = document_id(Some("a".to_string()), Some("b".to_string()), "movie");
        assert_eq!(picked.unwrap(), "a");
        assert_eq!(document_id(None, Some("b".to_string()), "movie").unwrap(), "b");
    }

    #[test]
    fn test_document_id_missing_both() {
        let err = document_id(None, None, "user").unwrap_err();
        assert!(err.contains("user"));
    }
}
