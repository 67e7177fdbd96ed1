// src/application/state.rs
//
// Composition root
//
// All fields are Arc-wrapped so the UI layer can share them freely.
// One transport is shared by every service; only the session service
// writes its auth header.

use std::sync::Arc;

use crate::application::dto::{DashboardView, SessionDto};
use crate::config::ClientConfig;
use crate::domain::MediaUrlResolver;
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::integrations::http::{ApiTransport, ReqwestApiClient};
use crate::integrations::player::MediaRuntime;
use crate::repositories::{CredentialStore, SqliteCredentialStore};
use crate::services::{
    CatalogService, DownloadService, PlaybackService, SessionService, SubscriptionService,
};

pub struct AppState {
    pub config: ClientConfig,
    pub event_bus: Arc<EventBus>,
    pub transport: Arc<dyn ApiTransport>,
    pub session_service: Arc<SessionService>,
    pub catalog_service: Arc<CatalogService>,
    pub playback_service: Arc<PlaybackService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub download_service: Arc<DownloadService>,
}

impl AppState {
    /// Build the production graph: SQLite credential store and reqwest transport.
    pub fn bootstrap(config: ClientConfig, runtime: Arc<dyn MediaRuntime>) -> AppResult<Self> {
        config.validate()?;

        let db_path = config.resolved_database_path()?;
        log::info!("credential store at {}", db_path.display());
        let store = Arc::new(SqliteCredentialStore::open(&db_path)?);

        let transport = Arc::new(ReqwestApiClient::new(
            config.api_base_url.clone(),
            config.request_timeout(),
        )?);

        Ok(Self::with_components(config, transport, store, runtime))
    }

    /// Wire services over caller-supplied infrastructure.
    pub fn with_components(
        config: ClientConfig,
        transport: Arc<dyn ApiTransport>,
        credential_store: Arc<dyn CredentialStore>,
        runtime: Arc<dyn MediaRuntime>,
    ) -> Self {
        let event_bus = Arc::new(create_event_bus());
        let resolver = MediaUrlResolver::new(config.media_base_url.clone());

        let session_service = Arc::new(SessionService::new(
            Arc::clone(&transport),
            credential_store,
            Arc::clone(&event_bus),
        ));
        let catalog_service = Arc::new(CatalogService::new(
            Arc::clone(&transport),
            Arc::clone(&event_bus),
            resolver.clone(),
        ));
        let playback_service = Arc::new(PlaybackService::new(
            Arc::clone(&transport),
            runtime,
            resolver,
            Arc::clone(&event_bus),
        ));
        let subscription_service = Arc::new(SubscriptionService::new(
            Arc::clone(&transport),
            Arc::clone(&event_bus),
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&transport),
            Arc::clone(&event_bus),
        ));

        Self {
            config,
            event_bus,
            transport,
            session_service,
            catalog_service,
            playback_service,
            subscription_service,
            download_service,
        }
    }

    pub fn session(&self) -> SessionDto {
        SessionDto::from(&self.session_service.snapshot())
    }

    /// Dashboard over the current snapshot and image-failure set.
    pub fn dashboard(&self) -> DashboardView {
        let catalog = &self.catalog_service;
        DashboardView::build(&catalog.snapshot(), catalog.resolver(), |id| {
            catalog.is_image_failed(id)
        })
    }
}
