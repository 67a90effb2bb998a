use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::error::BrowserError;
use crate::modules::movies::dto::FetchMoviesRequest;
use crate::modules::movies::model::MovieSummary;

pub const FETCH_MOVIES_PATH: &str = "api/fetch-movies";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of movie pages for the list controller.
///
/// Implemented over HTTP by [`ProxyClient`]; tests substitute scripted fakes.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_page(&self, request: &FetchMoviesRequest) -> Result<Vec<MovieSummary>, BrowserError>;
}

#[derive(Debug, Deserialize)]
struct MoviePage {
    movies: Vec<Value>,
}

impl MoviePage {
    /// Records that do not decode are skipped so one odd entry cannot blank the page.
    fn into_movies(self) -> Vec<MovieSummary> {
        self.movies
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<MovieSummary>(record) {
                Ok(movie) => Some(movie),
                Err(err) => {
                    warn!(error = %err, "Skipping undecodable movie record");
                    None
                }
            })
            .collect()
    }
}

/// Calls the catalog proxy route.
#[derive(Clone, Debug)]
pub struct ProxyClient {
    http: Client,
    endpoint: Url,
}

#[derive(Debug, Default)]
pub struct ProxyClientBuilder {
    base_url: Option<Url>,
    timeout: Option<Duration>,
}

impl ProxyClientBuilder {
    /// Origin serving the proxy route, e.g. `http://localhost:3000/`.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ProxyClient> {
        let base_url = self.base_url.context("base_url is required")?;
        let endpoint = base_url
            .join(FETCH_MOVIES_PATH)
            .with_context(|| format!("failed to join {FETCH_MOVIES_PATH} onto {base_url}"))?;

        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(ProxyClient { http, endpoint })
    }
}

impl ProxyClient {
    pub fn builder() -> ProxyClientBuilder {
        ProxyClientBuilder::default()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogApi for ProxyClient {
    async fn fetch_page(&self, request: &FetchMoviesRequest) -> Result<Vec<MovieSummary>, BrowserError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(serde_json::to_vec(request)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Proxy answered with an error status");
            return Err(BrowserError::Status(status));
        }

        let body = response.bytes().await?;
        let page: MoviePage = serde_json::from_slice(&body)?;

        Ok(page.into_movies())
    }
}
