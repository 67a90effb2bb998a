use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::movies::handler::fetch_movies,
    ),
    components(
        schemas(
            crate::modules::movies::dto::FetchMoviesRequest,
            crate::modules::movies::dto::FetchMoviesResponse,
            crate::common::response::ErrorBody,
        )
    ),
    tags(
        (name = "Movies", description = "Catalog proxy for the movie browser")
    )
)]
pub struct ApiDoc;
