use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::env::{self, EnvKey};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3/";
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set to a non-empty value")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        source: url::ParseError,
    },
}

/// Process-wide settings, resolved once at startup.
///
/// `catalog_api_key` is required: the server refuses to start without it rather
/// than answering every request with an empty page.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub catalog_api_key: String,
    pub catalog_base_url: Url,
    pub catalog_timeout: Duration,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let catalog_api_key = env::get(EnvKey::MovieApiKey)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(EnvKey::MovieApiKey.as_str()))?;

        let raw_url = env::get_or(EnvKey::CatalogBaseUrl, DEFAULT_CATALOG_BASE_URL);
        let catalog_base_url = Self::parse_base_url(&raw_url)?;

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000)?,
            catalog_api_key,
            catalog_base_url,
            catalog_timeout: Duration::from_secs(env::get_parsed(
                EnvKey::CatalogTimeoutSecs,
                DEFAULT_CATALOG_TIMEOUT_SECS,
            )?),
        })
    }

    // `Url::join` drops the last path segment unless the base ends with a slash.
    fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };

        Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
            key: EnvKey::CatalogBaseUrl.as_str(),
            source,
        })
    }
}
