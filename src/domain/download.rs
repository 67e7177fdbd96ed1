use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::document_id;
use crate::domain::movie::Movie;

/// An offline copy registered for the current user (`GET /downloads/my`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DownloadRecord")]
pub struct Download {
    pub id: String,
    /// Populated movie record when the backend expands it
    pub movie: Option<Movie>,
    pub quality: Option<String>,
    pub file_size: Option<u64>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadRecord {
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    movie: Option<Movie>,
    #[serde(default)]
    quality: Option<String>,
    #[serde(default)]
    file_size: Option<u64>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<DownloadRecord> for Download {
    type Error = String;

    fn try_from(record: DownloadRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(record.mongo_id, record.id, "download")?,
            movie: record.movie,
            quality: record.quality,
            file_size: record.file_size,
            status: record.status,
            created_at: record.created_at,
        })
    }
}

impl Download {
    pub fn title(&self) -> Option<&str> {
        self.movie.as_ref().map(|m| m.title.as_str())
    }
}
