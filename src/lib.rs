// src/lib.rs
// CineStream - session and catalog core for the streaming client
//
// Architecture:
// - Domain-centric: movie/user/subscription values and pure derivations
// - Event-driven: services publish facts on a synchronous EventBus
// - Explicit: one shared transport, one writer of its auth header
// - Application Layer: composition root, DTOs and UI error mapping

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    // Catalog
    CatalogSnapshot,
    // Subscriptions & downloads
    Download,
    GenreBucket,
    // User & credentials
    LoginCredentials,
    // Media
    MediaUrlResolver,
    Movie,
    PaymentInitialization,
    RegisterCredentials,
    SubscriptionPlan,
    User,
    UserSubscription,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{DomainEvent, EventBus};

// ============================================================================
// PUBLIC API - Services & Composition
// ============================================================================

pub use application::{AppState, DashboardView, ErrorResponse, ErrorType};
pub use config::ClientConfig;
pub use services::{
    CatalogService, DownloadService, FetchOutcome, LoadOutcome, PlaybackService, Session,
    SessionPhase, SessionService, SubscriptionService,
};
