use super::dto::{FetchMoviesRequest, FetchMoviesResponse};
use super::service::MovieService;
use crate::common::response::{ApiError, ApiSuccess, ErrorBody};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::IntoResponse,
};
use tracing::{error, info, warn};

/// Fetch one page of movies from the catalog
#[utoipa::path(
    post,
    path = "/api/fetch-movies",
    request_body = FetchMoviesRequest,
    responses(
        (status = 200, description = "Page of movies", body = FetchMoviesResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 405, description = "Only POST is accepted"),
        (status = 500, description = "Catalog unavailable or failed", body = ErrorBody)
    ),
    tag = "Movies"
)]
pub async fn fetch_movies(
    State(state): State<AppState>,
    payload: Result<Json<FetchMoviesRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            // Syntax, type and content-type problems all answer 400.
            warn!(error = %rejection.body_text(), status = %rejection.status(), "Rejected fetch-movies body");
            return ApiError(rejection.body_text(), StatusCode::BAD_REQUEST).into_response();
        }
    };

    info!(page = req.page, year = ?req.year, genre = %req.genre, "Fetching movies");

    match MovieService::fetch_page(state, req).await {
        Ok(res) => ApiSuccess(res, StatusCode::OK).into_response(),
        Err(e) => {
            error!(error = %e, "Catalog request failed");
            ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}

pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        format!("Method {method} Not Allowed"),
    )
}
