use anyhow::Result;

use crate::config::settings::AppConfig;
use crate::infrastructure::catalog::CatalogClient;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
}

impl AppState {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    /// Builds the upstream client once, at startup, from validated settings.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = CatalogClient::builder()
            .base_url(config.catalog_base_url.clone())
            .api_key(config.catalog_api_key.clone())
            .timeout(config.catalog_timeout)
            .build()?;

        Ok(Self::new(catalog))
    }
}
