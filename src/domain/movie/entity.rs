use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::document_id;

/// A catalog title as served by `GET /movies`.
///
/// The client never mutates a Movie; snapshots are rebuilt wholesale.
/// Only the id and `title` are required so one sparse record does not fail
/// the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MovieRecord")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Genre labels in authoring order; duplicates allowed
    pub genre: Vec<String>,
    pub release_year: i32,
    /// Runtime in minutes
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// Relative path or absolute URL
    pub video_url: String,
    /// Relative path or absolute URL
    pub thumbnail_url: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRecord {
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    genre: Vec<String>,
    #[serde(default)]
    release_year: i32,
    #[serde(default, rename = "duration", alias = "durationMinutes")]
    duration_minutes: u32,
    #[serde(default)]
    video_url: String,
    #[serde(default)]
    thumbnail_url: String,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    created_at: DateTime<Utc>,
}

impl TryFrom<MovieRecord> for Movie {
    type Error = String;

    fn try_from(record: MovieRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(record.mongo_id, record.id, "movie")?,
            title: record.title,
            description: record.description,
            genre: record.genre,
            release_year: record.release_year,
            duration_minutes: record.duration_minutes,
            video_url: record.video_url,
            thumbnail_url: record.thumbnail_url,
            is_featured: record.is_featured,
            created_at: record.created_at,
        })
    }
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            genre: Vec::new(),
            release_year: 0,
            duration_minutes: 0,
            video_url: String::new(),
            thumbnail_url: String::new(),
            is_featured: false,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genre = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Case-insensitive substring test against every genre label.
    pub fn has_genre_containing(&self, keyword_lowercase: &str) -> bool {
        self.genre
            .iter()
            .any(|g| g.to_lowercase().contains(keyword_lowercase))
    }
}
