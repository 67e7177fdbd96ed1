// src/domain/catalog/snapshot.rs
//
// Catalog Snapshot - derived view of one full movie fetch.
//
// CRITICAL RULES:
// - Built in one pass from a complete movie list; never patched
// - Bucket membership is non-exclusive
// - All orderings are stable with respect to the fetched order

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::movie::Movie;

/// Featured fallback length when nothing is flagged featured.
pub const FEATURED_FALLBACK_COUNT: usize = 5;

/// Cap for "Recently Added" and every genre bucket.
pub const SECTION_CAP: usize = 10;

/// Default length of the trending list.
pub const TRENDING_LIMIT: usize = 10;

/// Genre rows shown on the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenreBucket {
    Action,
    Comedy,
    Drama,
    Horror,
    Romance,
    SciFi,
}

impl GenreBucket {
    pub const ALL: [GenreBucket; 6] = [
        GenreBucket::Action,
        GenreBucket::Comedy,
        GenreBucket::Drama,
        GenreBucket::Horror,
        GenreBucket::Romance,
        GenreBucket::SciFi,
    ];

    /// Lowercase keywords; a movie belongs when any genre label contains one.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            GenreBucket::Action => &["action"],
            GenreBucket::Comedy => &["comedy"],
            GenreBucket::Drama => &["drama"],
            GenreBucket::Horror => &["horror"],
            GenreBucket::Romance => &["romance"],
            GenreBucket::SciFi => &["sci-fi", "science"],
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        self.keywords()
            .iter()
            .any(|keyword| movie.has_genre_containing(keyword))
    }
}

impl fmt::Display for GenreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreBucket::Action => write!(f, "Action"),
            GenreBucket::Comedy => write!(f, "Comedy"),
            GenreBucket::Drama => write!(f, "Drama"),
            GenreBucket::Horror => write!(f, "Horror"),
            GenreBucket::Romance => write!(f, "Romance"),
            GenreBucket::SciFi => write!(f, "Sci-Fi"),
        }
    }
}

/// Immutable partitioned catalog.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub all_movies: Vec<Movie>,
    pub featured: Vec<Movie>,
    pub recently_added: Vec<Movie>,
    genre_buckets: Vec<(GenreBucket, Vec<Movie>)>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Derive every section from a freshly fetched list.
    pub fn build(movies: Vec<Movie>) -> Self {
        let featured = Self::derive_featured(&movies);
        let recently_added = Self::derive_recent(&movies);
        let genre_buckets = GenreBucket::ALL
            .iter()
            .map(|bucket| {
                let members = movies
                    .iter()
                    .filter(|movie| bucket.matches(movie))
                    .take(SECTION_CAP)
                    .cloned()
                    .collect();
                (*bucket, members)
            })
            .collect();

        Self {
            all_movies: movies,
            featured,
            recently_added,
            genre_buckets,
            fetched_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    fn derive_featured(movies: &[Movie]) -> Vec<Movie> {
        let flagged: Vec<Movie> = movies.iter().filter(|m| m.is_featured).cloned().collect();
        if flagged.is_empty() {
            movies.iter().take(FEATURED_FALLBACK_COUNT).cloned().collect()
        } else {
            flagged
        }
    }

    fn derive_recent(movies: &[Movie]) -> Vec<Movie> {
        let mut sorted = movies.to_vec();
        // sort_by is stable: equal timestamps keep fetched order
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(SECTION_CAP);
        sorted
    }

    pub fn genre(&self, bucket: GenreBucket) -> &[Movie] {
        self.genre_buckets
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, movies)| movies.as_slice())
            .unwrap_or(&[])
    }

    /// Genre buckets in display order.
    pub fn genre_buckets(&self) -> impl Iterator<Item = (GenreBucket, &[Movie])> {
        self.genre_buckets
            .iter()
            .map(|(bucket, movies)| (*bucket, movies.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.all_movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_movies.is_empty()
    }

    pub fn find(&self, movie_id: &str) -> Option<&Movie> {
        self.all_movies.iter().find(|m| m.id == movie_id)
    }

    /// Title or any genre contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.all_movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle) || m.has_genre_containing(&needle))
            .collect()
    }

    /// Exact genre label, compared case-insensitively.
    pub fn by_genre(&self, genre: &str) -> Vec<&Movie> {
        let wanted = genre.trim().to_lowercase();
        self.all_movies
            .iter()
            .filter(|m| m.genre.iter().any(|g| g.to_lowercase() == wanted))
            .collect()
    }

    /// Newest releases first (by release year), stable on ties.
    pub fn trending(&self, limit: usize) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.all_movies.iter().collect();
        movies.sort_by(|a, b| b.release_year.cmp(&a.release_year));
        movies.truncate(limit);
        movies
    }
}
