// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain values only (never TO)

use serde::Serialize;

use crate::domain::{format_time, CatalogSnapshot, MediaUrlResolver, Movie};
use crate::services::Session;

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub error: Option<String>,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            is_authenticated: session.is_authenticated(),
            is_loading: session.is_loading(),
            username: session.user.as_ref().map(|u| u.username.clone()),
            email: session.user.as_ref().map(|u| u.email.clone()),
            is_admin: session.user.as_ref().is_some_and(|u| u.is_admin()),
            error: session.last_error.clone(),
        }
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCardDto {
    pub id: String,
    pub title: String,
    /// None when the movie has no thumbnail at all
    pub thumbnail_url: Option<String>,
    /// Show the placeholder instead of `thumbnail_url`
    pub image_failed: bool,
    pub release_year: i32,
    pub genres: Vec<String>,
    pub duration_label: String,
}

impl MovieCardDto {
    pub fn from_movie(movie: &Movie, resolver: &MediaUrlResolver, image_failed: bool) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            thumbnail_url: resolver.resolve_image_url(&movie.thumbnail_url),
            image_failed,
            release_year: movie.release_year,
            genres: movie.genre.clone(),
            duration_label: format_time(u64::from(movie.duration_minutes) * 60_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSection {
    pub title: String,
    pub movies: Vec<MovieCardDto>,
}

/// Dashboard rows in display order; empty rows are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub sections: Vec<DashboardSection>,
}

impl DashboardView {
    pub fn build<F>(snapshot: &CatalogSnapshot, resolver: &MediaUrlResolver, image_failed: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let card = |movie: &Movie| MovieCardDto::from_movie(movie, resolver, image_failed(&movie.id));

        let mut rows: Vec<(String, &[Movie])> = vec![
            ("Featured".to_string(), snapshot.featured.as_slice()),
            ("Recently Added".to_string(), snapshot.recently_added.as_slice()),
        ];
        rows.extend(
            snapshot
                .genre_buckets()
                .map(|(bucket, movies)| (bucket.to_string(), movies)),
        );

        let sections = rows
            .into_iter()
            .filter(|(_, movies)| !movies.is_empty())
            .map(|(title, movies)| DashboardSection {
                title,
                movies: movies.iter().map(&card).collect(),
            })
            .collect();

        Self { sections }
    }

    pub fn section(&self, title: &str) -> Option<&DashboardSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }
}
