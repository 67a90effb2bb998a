use std::env;
use std::str::FromStr;

use crate::config::settings::ConfigError;

#[derive(Debug, Clone, Copy)]
pub enum EnvKey {
    ServerPort,
    MovieApiKey,
    CatalogBaseUrl,
    CatalogTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::MovieApiKey => "MOVIE_API_KEY",
            EnvKey::CatalogBaseUrl => "CATALOG_BASE_URL",
            EnvKey::CatalogTimeoutSecs => "CATALOG_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    get(key).unwrap_or_else(|_| default.to_string())
}

/// Unset falls back to `default`; a value that does not parse is an error.
pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> Result<T, ConfigError> {
    parse_or(key, get(key).ok(), default)
}

fn parse_or<T: FromStr>(key: EnvKey, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.as_str(),
            value,
        }),
    }
}
