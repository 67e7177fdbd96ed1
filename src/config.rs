// src/config.rs
//
// Client configuration
//
// Layering (later wins):
// 1. built-in defaults
// 2. optional `cinestream.yaml` in the working directory
// 3. environment variables prefixed `CINESTREAM_`

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::db;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://shekwoagube.onrender.com/api";
pub const DEFAULT_MEDIA_BASE_URL: &str = "https://shekwoagube.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const CONFIG_FILE_NAME: &str = "cinestream.yaml";
pub const ENV_PREFIX: &str = "CINESTREAM_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST base, e.g. `https://host/api`
    pub api_base_url: String,

    /// Host that relative thumbnail and video paths are resolved against
    pub media_base_url: String,

    pub request_timeout_secs: u64,

    /// Credential database; `None` means the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            database_path: None,
        }
    }
}

impl ClientConfig {
    /// Load from the working directory and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(Path::new(CONFIG_FILE_NAME)).extract()
    }

    /// Provider chain with an explicit yaml location. A missing file is skipped.
    pub fn figment(yaml_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> AppResult<()> {
        for (name, url) in [
            ("api_base_url", &self.api_base_url),
            ("media_base_url", &self.media_base_url),
        ] {
            let url = url.trim();
            if url.is_empty() {
                return Err(AppError::Validation(format!("{} must not be empty", name)));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Validation(format!(
                    "{} must be an http(s) URL, got {}",
                    name, url
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Validation(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolved_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => db::default_database_path(),
        }
    }
}
