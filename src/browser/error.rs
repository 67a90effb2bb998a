use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Something went wrong while fetching movies")]
    Status(StatusCode),
    #[error("Failed to load movies: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("'{0}' is not a valid release year")]
    InvalidYear(String),
}
