// src/integrations/player/runtime.rs
//
// Media Playback Runtime Boundary
//
// The native player (video surface, decoder, buffering) lives outside this
// crate. The core only issues transport commands and consumes the status
// reports the runtime pushes back.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - The runtime owns the real playhead; the core keeps the last report
// - Positions are milliseconds

use async_trait::async_trait;

use crate::error::AppResult;

/// Status report pushed by the runtime on every tick or state change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStatus {
    pub is_loaded: bool,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
}

impl RuntimeStatus {
    /// A runtime that has loaded media and reports where it is.
    pub fn loaded(position_ms: u64, duration_ms: u64, is_playing: bool) -> Self {
        Self {
            is_loaded: true,
            is_playing,
            position_ms,
            duration_ms: Some(duration_ms),
        }
    }
}

/// Transport commands understood by the native player.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRuntime: Send + Sync {
    /// Hand a playable URL to the runtime.
    async fn load(&self, url: &str) -> AppResult<()>;

    async fn play(&self) -> AppResult<()>;

    async fn pause(&self) -> AppResult<()>;

    async fn set_position(&self, position_ms: u64) -> AppResult<()>;
}
