// src/events/mod.rs
//
// Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Session
    AuthenticationFailed,
    // Catalog
    CatalogFetchFailed,
    CatalogRefreshed,
    // Account
    DownloadRemoved,
    ImageLoadFailed,
    // Playback
    PlaybackReady,
    SessionRestored,
    StaleCatalogResponseDiscarded,
    SubscriptionChanged,
    SubscriptionRequired,
    UserLoggedIn,
    UserLoggedOut,
    UserRegistered,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
