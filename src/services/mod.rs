// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Every service talks to the backend through one shared
// Arc<dyn ApiTransport>. Only SessionService configures its auth header.

pub mod catalog_service;
pub mod download_service;
pub mod payload;
pub mod playback_service;
pub mod session_service;
pub mod subscription_service;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod catalog_service_tests;

pub use catalog_service::{CatalogService, FetchOutcome};
pub use download_service::DownloadService;
pub use playback_service::{LoadOutcome, PlaybackService, PlaybackState};
pub use session_service::{Session, SessionPhase, SessionService};
pub use subscription_service::SubscriptionService;
