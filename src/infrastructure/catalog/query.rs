use url::Url;

pub const DISCOVER_PATH: &str = "discover/movie";

const SORT_ORDER: &str = "year.decr";
const PAGE_LIMIT: u32 = 12;

/// Parameters of one upstream discover call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub year: i32,
    pub genre: Option<String>,
}

impl DiscoverQuery {
    /// A blank `genre` means "no genre constraint" and is left out of the query.
    pub fn new(page: u32, year: i32, genre: &str) -> Self {
        let genre = genre.trim();

        Self {
            page,
            year,
            genre: (!genre.is_empty()).then(|| genre.to_string()),
        }
    }

    /// Appends the query string to `url`. Only parameters with a value are written.
    pub fn write_to(&self, url: &mut Url, api_key: &str) {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("api_key", api_key)
            .append_pair("page", &self.page.to_string())
            .append_pair("year", &self.year.to_string())
            .append_pair("sort", SORT_ORDER)
            .append_pair("limit", &PAGE_LIMIT.to_string());

        if let Some(genre) = &self.genre {
            pairs.append_pair("genre", genre);
        }
    }
}
