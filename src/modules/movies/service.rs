use time::OffsetDateTime;

use super::dto::{FetchMoviesRequest, FetchMoviesResponse};
use crate::infrastructure::catalog::{CatalogError, DiscoverQuery};
use crate::state::AppState;

pub struct MovieService;

impl MovieService {
    pub async fn fetch_page(
        state: AppState,
        req: FetchMoviesRequest,
    ) -> Result<FetchMoviesResponse, CatalogError> {
        let query = Self::discover_query(&req, OffsetDateTime::now_utc().year());
        let movies = state.catalog.discover_movies(&query).await?;

        Ok(FetchMoviesResponse { movies })
    }

    // The page is forwarded as-is; callers own its sanity.
    fn discover_query(req: &FetchMoviesRequest, current_year: i32) -> DiscoverQuery {
        DiscoverQuery::new(req.page, req.year.unwrap_or(current_year), &req.genre)
    }
}
