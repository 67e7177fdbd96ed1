// src/integrations/player/headless.rs
//
// Runtime used when no native player is attached (the smoke binary,
// integration checks). Commands are logged and acknowledged; the runtime
// never reports a loaded state on its own.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use super::runtime::MediaRuntime;
use crate::error::AppResult;

#[derive(Debug, Default)]
pub struct HeadlessRuntime {
    loaded_url: Mutex<Option<String>>,
}

impl HeadlessRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded_url(&self) -> Option<String> {
        self.loaded_url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MediaRuntime for HeadlessRuntime {
    async fn load(&self, url: &str) -> AppResult<()> {
        log::info!("[player] load {}", url);
        *self.loaded_url.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_string());
        Ok(())
    }

    async fn play(&self) -> AppResult<()> {
        log::info!("[player] play");
        Ok(())
    }

    async fn pause(&self) -> AppResult<()> {
        log::info!("[player] pause");
        Ok(())
    }

    async fn set_position(&self, position_ms: u64) -> AppResult<()> {
        log::info!("[player] seek to {} ms", position_ms);
        Ok(())
    }
}
