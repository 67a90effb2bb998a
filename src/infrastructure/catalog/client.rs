use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::query::{DISCOVER_PATH, DiscoverQuery};
use crate::config::settings::{DEFAULT_CATALOG_BASE_URL, DEFAULT_CATALOG_TIMEOUT_SECS};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("Failed to fetch movies. Status: {}", .0.as_u16())]
    Upstream(StatusCode),
    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

impl CatalogError {
    // reqwest includes the request URL in its message, and ours carries the API key.
    fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    results: Vec<Value>,
}

/// Client for the third-party movie catalog.
///
/// Every call is a single GET: no caching and no retry.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Default)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl CatalogClientBuilder {
    /// Overrides the catalog base URL (wiremock in tests). Must end with `/`.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<CatalogClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .context("api_key is required")?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_CATALOG_BASE_URL).context("invalid default base URL")?,
        };

        let http = Client::builder()
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS)),
            )
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http,
            base_url,
            api_key,
        })
    }
}

impl CatalogClient {
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    /// Fetches one page of discover results, returning the records untouched.
    pub async fn discover_movies(&self, query: &DiscoverQuery) -> Result<Vec<Value>, CatalogError> {
        let mut url = self.base_url.join(DISCOVER_PATH)?;
        query.write_to(&mut url, &self.api_key);

        debug!(page = query.page, year = query.year, genre = ?query.genre, "Querying catalog");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CatalogError::transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, page = query.page, "Catalog returned an error status");
            return Err(CatalogError::Upstream(status));
        }

        let body = response.bytes().await.map_err(CatalogError::transport)?;
        let page: DiscoverResponse = serde_json::from_slice(&body)?;

        debug!(count = page.results.len(), "Catalog page received");
        Ok(page.results)
    }
}
