// src/domain/media_url.rs
//
// Media URL resolution.
//
// Thumbnails and videos arrive either as absolute URLs or as paths relative
// to the media host. Resolution is pure and recomputed on every render path.

/// True when `raw` starts with a URI scheme such as `https://`.
pub fn has_scheme(raw: &str) -> bool {
    match raw.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrlResolver {
    base_host: String,
}

impl MediaUrlResolver {
    /// `base_host` must itself be absolute (e.g. `https://cdn.example.com`).
    pub fn new(base_host: impl Into<String>) -> Self {
        Self {
            base_host: base_host.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    pub fn resolve_image_url(&self, raw: &str) -> Option<String> {
        self.resolve(raw)
    }

    pub fn resolve_video_url(&self, raw: &str) -> Option<String> {
        self.resolve(raw)
    }

    /// Absolute URLs pass through; relative paths lose one leading `/`
    /// and are prefixed with the media host. Blank input resolves to nothing.
    fn resolve(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if has_scheme(raw) {
            return Some(raw.to_string());
        }
        let path = raw.strip_prefix('/').unwrap_or(raw);
        Some(format!("{}/{}", self.base_host, path))
    }
}
