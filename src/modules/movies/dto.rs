use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /api/fetch-movies`.
///
/// `genre` is already resolved by the caller: an empty string means no genre
/// constraint. `year` falls back to the current year on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FetchMoviesRequest {
    pub page: u32,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: String,
}

/// Successful proxy response. Records are forwarded exactly as the catalog sent them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FetchMoviesResponse {
    #[schema(value_type = Vec<Object>)]
    pub movies: Vec<Value>,
}
