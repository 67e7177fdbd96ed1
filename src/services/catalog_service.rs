// src/services/catalog_service.rs
//
// Catalog Synchronizer
//
// ARCHITECTURE:
// - One GET /movies per refresh; every section is derived from that list
// - The snapshot is an Arc swapped under a write lock, so readers see
//   either the old buckets or the new ones, never a mix
// - A failed refresh keeps the last good snapshot on screen
//
// ORDERING:
// - Each fetch takes a sequence number before its first await
// - Only the most recently initiated fetch may touch state; an older
//   response (success or failure) is discarded as Superseded
// - The check and the swap happen under the same lock

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{CatalogSnapshot, MediaUrlResolver, Movie};
use crate::error::{AppError, AppResult};
use crate::events::{
    CatalogFetchFailed, CatalogRefreshed, EventBus, ImageLoadFailed,
    StaleCatalogResponseDiscarded,
};
use crate::integrations::http::ApiTransport;
use crate::services::payload;

/// Result of a `fetch_all` that did not fail.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// This fetch was the latest and its snapshot is now current
    Applied(Arc<CatalogSnapshot>),
    /// A newer fetch was started before this one resolved
    Superseded,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied(_))
    }
}

struct CatalogState {
    snapshot: Arc<CatalogSnapshot>,
    /// Sequence of the last fetch that settled (applied or failed)
    settled_seq: u64,
    failed_images: HashSet<String>,
    last_error: Option<String>,
}

pub struct CatalogService {
    transport: Arc<dyn ApiTransport>,
    event_bus: Arc<EventBus>,
    resolver: MediaUrlResolver,
    latest_seq: AtomicU64,
    state: RwLock<CatalogState>,
}

impl CatalogService {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        event_bus: Arc<EventBus>,
        resolver: MediaUrlResolver,
    ) -> Self {
        Self {
            transport,
            event_bus,
            resolver,
            latest_seq: AtomicU64::new(0),
            state: RwLock::new(CatalogState {
                snapshot: Arc::new(CatalogSnapshot::empty()),
                settled_seq: 0,
                failed_images: HashSet::new(),
                last_error: None,
            }),
        }
    }

    // ========================================================================
    // REFRESH
    // ========================================================================

    pub async fn fetch_all(&self) -> AppResult<FetchOutcome> {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("catalog fetch #{} started", seq);

        let result = match self.transport.get("/movies").await {
            Ok(body) => payload::data_list::<Movie>(&body, "movies", false),
            Err(e) => Err(AppError::from(e)),
        };

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let latest = self.latest_seq.load(Ordering::SeqCst);
        if seq != latest {
            drop(state);
            log::debug!("catalog fetch #{} superseded by #{}", seq, latest);
            self.event_bus
                .emit(StaleCatalogResponseDiscarded::new(seq, latest));
            return Ok(FetchOutcome::Superseded);
        }

        state.settled_seq = seq;

        match result {
            Ok(movies) => {
                let snapshot = Arc::new(CatalogSnapshot::build(movies));
                state.snapshot = Arc::clone(&snapshot);
                state.failed_images.clear();
                state.last_error = None;
                drop(state);

                log::info!("catalog refreshed with {} movies", snapshot.len());
                self.event_bus
                    .emit(CatalogRefreshed::new(seq, snapshot.len()));
                Ok(FetchOutcome::Applied(snapshot))
            }
            Err(err) => {
                state.last_error = Some(err.to_string());
                drop(state);

                log::warn!("catalog fetch #{} failed: {}", seq, err);
                self.event_bus
                    .emit(CatalogFetchFailed::new(seq, err.to_string()));
                Err(err)
            }
        }
    }

    /// `GET /movies/:id`, independent of the snapshot.
    pub async fn get_movie(&self, movie_id: &str) -> AppResult<Movie> {
        let body = self.transport.get(&format!("/movies/{}", movie_id)).await?;
        payload::data_field(&body, "movie")
    }

    // ========================================================================
    // SNAPSHOT QUERIES
    // ========================================================================

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.read().snapshot)
    }

    /// Error of the latest settled fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    /// True while the most recently initiated fetch is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.read().settled_seq != self.latest_seq.load(Ordering::SeqCst)
    }

    pub fn search(&self, query: &str) -> Vec<Movie> {
        self.snapshot().search(query).into_iter().cloned().collect()
    }

    pub fn by_genre(&self, genre: &str) -> Vec<Movie> {
        self.snapshot().by_genre(genre).into_iter().cloned().collect()
    }

    pub fn trending(&self, limit: usize) -> Vec<Movie> {
        self.snapshot().trending(limit).into_iter().cloned().collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // MEDIA
    // ========================================================================

    pub fn resolver(&self) -> &MediaUrlResolver {
        &self.resolver
    }

    pub fn resolve_image_url(&self, raw: &str) -> Option<String> {
        self.resolver.resolve_image_url(raw)
    }

    pub fn resolve_video_url(&self, raw: &str) -> Option<String> {
        self.resolver.resolve_video_url(raw)
    }

    /// Record that a thumbnail failed to load. Idempotent.
    pub fn mark_image_failed(&self, movie_id: &str) {
        let inserted = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failed_images
            .insert(movie_id.to_string());

        if inserted {
            self.event_bus.emit(ImageLoadFailed::new(movie_id.to_string()));
        }
    }

    pub fn is_image_failed(&self, movie_id: &str) -> bool {
        self.read().failed_images.contains(movie_id)
    }

    pub fn failed_image_count(&self) -> usize {
        self.read().failed_images.len()
    }
}
