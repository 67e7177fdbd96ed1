// src/services/download_service.rs
//
// Download Service - the user's registered offline copies

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::Download;
use crate::error::AppResult;
use crate::events::{DownloadRemoved, EventBus};
use crate::integrations::http::ApiTransport;
use crate::services::payload;

pub struct DownloadService {
    transport: Arc<dyn ApiTransport>,
    event_bus: Arc<EventBus>,
    cached: RwLock<Vec<Download>>,
}

impl DownloadService {
    pub fn new(transport: Arc<dyn ApiTransport>, event_bus: Arc<EventBus>) -> Self {
        Self {
            transport,
            event_bus,
            cached: RwLock::new(Vec::new()),
        }
    }

    pub fn cached(&self) -> Vec<Download> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `GET /downloads/my`; a reply without a list means none.
    pub async fn list_mine(&self) -> AppResult<Vec<Download>> {
        let body = self.transport.get("/downloads/my").await?;
        let downloads: Vec<Download> = payload::data_list(&body, "downloads", true)?;

        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = downloads.clone();
        Ok(downloads)
    }

    pub async fn remove(&self, download_id: &str) -> AppResult<()> {
        self.transport
            .delete(&format!("/downloads/{}", download_id))
            .await?;

        self.cached
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|d| d.id != download_id);

        self.event_bus
            .emit(DownloadRemoved::new(download_id.to_string()));
        Ok(())
    }
}
