#![allow(dead_code)]

use std::time::Duration;

use movie_browser::config::settings::AppConfig;
use movie_browser::state::AppState;
use url::Url;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

/// App state whose catalog client talks to `upstream`.
pub fn state_for(upstream: &MockServer) -> AppState {
    let config = AppConfig {
        server_port: 0,
        catalog_api_key: API_KEY.to_string(),
        catalog_base_url: Url::parse(&format!("{}/3/", upstream.uri())).unwrap(),
        catalog_timeout: Duration::from_secs(5),
    };

    AppState::from_config(&config).unwrap()
}
