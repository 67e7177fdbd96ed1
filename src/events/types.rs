// src/events/types.rs
//
// All events published by the client core.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted once startup restoration settles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRestored {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// None when restoration ended anonymous
    pub user_id: Option<String>,
}

impl SessionRestored {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

domain_event!(SessionRestored);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedIn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
    pub username: String,
}

impl UserLoggedIn {
    pub fn new(user_id: String, username: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            username,
        }
    }
}

domain_event!(UserLoggedIn);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: String,
    pub username: String,
}

impl UserRegistered {
    pub fn new(user_id: String, username: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            username,
        }
    }
}

domain_event!(UserRegistered);

/// Emitted when login or registration fails after validation passed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticationFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub operation: String, // "login" | "register"
    pub reason: String,
}

impl AuthenticationFailed {
    pub fn new(operation: &str, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            operation: operation.to_string(),
            reason,
        }
    }
}

domain_event!(AuthenticationFailed);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedOut {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl UserLoggedOut {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for UserLoggedOut {
    fn default() -> Self {
        Self::new()
    }
}

domain_event!(UserLoggedOut);

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// A fetch was applied and the snapshot replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_seq: u64,
    pub movie_count: usize,
}

impl CatalogRefreshed {
    pub fn new(request_seq: u64, movie_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_seq,
            movie_count,
        }
    }
}

domain_event!(CatalogRefreshed);

/// The latest fetch failed; the previous snapshot is still shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFetchFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_seq: u64,
    pub reason: String,
}

impl CatalogFetchFailed {
    pub fn new(request_seq: u64, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_seq,
            reason,
        }
    }
}

domain_event!(CatalogFetchFailed);

/// An older fetch resolved after a newer one was issued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleCatalogResponseDiscarded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_seq: u64,
    pub latest_seq: u64,
}

impl StaleCatalogResponseDiscarded {
    pub fn new(request_seq: u64, latest_seq: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_seq,
            latest_seq,
        }
    }
}

domain_event!(StaleCatalogResponseDiscarded);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLoadFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
}

impl ImageLoadFailed {
    pub fn new(movie_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

domain_event!(ImageLoadFailed);

// ============================================================================
// PLAYBACK EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackReady {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
    pub stream_url: String,
}

impl PlaybackReady {
    pub fn new(movie_id: String, stream_url: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            stream_url,
        }
    }
}

domain_event!(PlaybackReady);

/// The watch endpoint refused playback for lack of a subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequired {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
}

impl SubscriptionRequired {
    pub fn new(movie_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

domain_event!(SubscriptionRequired);

// ============================================================================
// ACCOUNT EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub subscription_id: Option<String>,
    pub status: Option<String>,
}

impl SubscriptionChanged {
    pub fn new(subscription_id: Option<String>, status: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            subscription_id,
            status,
        }
    }
}

domain_event!(SubscriptionChanged);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub download_id: String,
}

impl DownloadRemoved {
    pub fn new(download_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            download_id,
        }
    }
}

domain_event!(DownloadRemoved);
