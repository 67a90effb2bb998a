use axum::Router;
use axum::routing::post;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/fetch-movies",
        post(handler::fetch_movies).fallback(handler::method_not_allowed),
    )
}
