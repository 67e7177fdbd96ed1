// src/services/playback_service.rs
//
// Playback Session
//
// - Resolves a playable URL through the subscription-gated watch endpoint
// - Drives the external media runtime (load / play / pause / seek)
// - Keeps the last status the runtime reported; controls are inert until
//   the runtime says the media is loaded
//
// A 403 carrying `requiresSubscription` is an outcome, not an error: the UI
// shows the subscribe prompt instead of an error banner.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{clamp_seek, format_time, progress_ratio, MediaUrlResolver, Movie, SEEK_STEP_MS};
use crate::error::{AppError, AppResult, INVALID_RESPONSE_MESSAGE};
use crate::events::{EventBus, PlaybackReady, SubscriptionRequired};
use crate::integrations::http::ApiTransport;
use crate::integrations::player::{MediaRuntime, RuntimeStatus};
use crate::services::payload;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The runtime has been handed `stream_url`
    Ready { movie: Movie, stream_url: String },
    RequiresSubscription,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub movie: Option<Movie>,
    pub stream_url: Option<String>,
    pub status: RuntimeStatus,
    pub requires_subscription: bool,
}

impl PlaybackState {
    /// Transport controls do nothing until position and duration are known.
    pub fn controls_enabled(&self) -> bool {
        self.status.is_loaded && self.status.duration_ms.is_some()
    }

    pub fn position_label(&self) -> String {
        format_time(self.status.position_ms)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.status.duration_ms.unwrap_or(0))
    }

    pub fn progress(&self) -> f64 {
        progress_ratio(self.status.position_ms, self.status.duration_ms.unwrap_or(0))
    }
}

pub struct PlaybackService {
    transport: Arc<dyn ApiTransport>,
    runtime: Arc<dyn MediaRuntime>,
    resolver: MediaUrlResolver,
    event_bus: Arc<EventBus>,
    state: RwLock<PlaybackState>,
}

impl PlaybackService {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        runtime: Arc<dyn MediaRuntime>,
        resolver: MediaUrlResolver,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            transport,
            runtime,
            resolver,
            event_bus,
            state: RwLock::new(PlaybackState::default()),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn status(&self) -> RuntimeStatus {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .status
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut PlaybackState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    /// `GET /movies/watch/:id`, then hand the resolved URL to the runtime.
    pub async fn load_movie(&self, movie_id: &str) -> AppResult<LoadOutcome> {
        self.update(|s| *s = PlaybackState::default());

        let body = match self
            .transport
            .get(&format!("/movies/watch/{}", movie_id))
            .await
        {
            Ok(body) => body,
            Err(e) => match AppError::from(e) {
                AppError::SubscriptionRequired(_) => {
                    log::info!("movie {} requires a subscription", movie_id);
                    self.update(|s| s.requires_subscription = true);
                    self.event_bus
                        .emit(SubscriptionRequired::new(movie_id.to_string()));
                    return Ok(LoadOutcome::RequiresSubscription);
                }
                other => return Err(other),
            },
        };

        let movie: Movie = payload::data_field(&body, "movie")?;
        let stream_url = self
            .resolver
            .resolve_video_url(&movie.video_url)
            .ok_or_else(|| AppError::ResponseShape(INVALID_RESPONSE_MESSAGE.to_string()))?;

        self.runtime.load(&stream_url).await?;

        self.update(|s| {
            s.movie = Some(movie.clone());
            s.stream_url = Some(stream_url.clone());
        });
        self.event_bus
            .emit(PlaybackReady::new(movie.id.clone(), stream_url.clone()));

        Ok(LoadOutcome::Ready { movie, stream_url })
    }

    /// Ingest a status report from the runtime.
    pub fn on_status(&self, status: RuntimeStatus) {
        self.update(|s| s.status = status);
    }

    /// Returns the new playing flag, or `None` while inert.
    pub async fn toggle_play_pause(&self) -> AppResult<Option<bool>> {
        let status = self.status();
        if !status.is_loaded {
            return Ok(None);
        }

        let now_playing = if status.is_playing {
            self.runtime.pause().await?;
            false
        } else {
            self.runtime.play().await?;
            true
        };

        self.update(|s| s.status.is_playing = now_playing);
        Ok(Some(now_playing))
    }

    /// Move the playhead by `delta_ms`, clamped to `[0, duration]`.
    ///
    /// Returns the new position, or `None` while inert.
    pub async fn seek(&self, delta_ms: i64) -> AppResult<Option<u64>> {
        let status = self.status();
        let duration_ms = match status.duration_ms {
            Some(duration) if status.is_loaded => duration,
            _ => return Ok(None),
        };

        let target = clamp_seek(status.position_ms, delta_ms, duration_ms);
        self.runtime.set_position(target).await?;

        self.update(|s| s.status.position_ms = target);
        Ok(Some(target))
    }

    pub async fn seek_forward(&self) -> AppResult<Option<u64>> {
        self.seek(SEEK_STEP_MS).await
    }

    pub async fn seek_backward(&self) -> AppResult<Option<u64>> {
        self.seek(-SEEK_STEP_MS).await
    }
}
