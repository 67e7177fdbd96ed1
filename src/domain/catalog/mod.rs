pub mod snapshot;

pub use snapshot::{
    CatalogSnapshot, GenreBucket, FEATURED_FALLBACK_COUNT, SECTION_CAP, TRENDING_LIMIT,
};
