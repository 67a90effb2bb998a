use serde::Serialize;

use crate::modules::movies::model::MovieSummary;

/// Public image CDN prefix for poster paths.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// What a movie card renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieViewModel {
    pub title: String,
    pub poster_image_url: String,
    pub release_year: String,
}

impl From<&MovieSummary> for MovieViewModel {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            title: movie.title.clone(),
            poster_image_url: poster_url(&movie.poster_path),
            release_year: release_year(&movie.release_date),
        }
    }
}

pub fn poster_url(poster_path: &str) -> String {
    format!("{IMAGE_BASE_URL}/{}", poster_path.trim_start_matches('/'))
}

/// First four characters of the date; shorter or malformed dates yield what is there.
pub fn release_year(release_date: &str) -> String {
    release_date.chars().take(4).collect()
}
