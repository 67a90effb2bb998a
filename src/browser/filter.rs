use std::fmt;

use super::error::BrowserError;
use crate::modules::movies::dto::FetchMoviesRequest;

/// Years offered by the year selector, newest first.
pub const YEAR_OPTIONS: [i32; 6] = [2024, 2023, 2022, 2021, 2020, 2019];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genre {
    /// No genre filter.
    #[default]
    All,
    Animation,
    Comedy,
    Fantasy,
}

impl Genre {
    /// Button order on the page.
    pub const OPTIONS: [Genre; 4] = [Genre::All, Genre::Animation, Genre::Comedy, Genre::Fantasy];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::All => "All",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Fantasy => "Fantasy",
        }
    }

    /// Value sent to the proxy; `All` is never a filter.
    pub fn filter_value(self) -> Option<&'static str> {
        match self {
            Genre::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the year selector's value. Empty input clears the filter.
pub fn parse_year(input: &str) -> Result<Option<i32>, BrowserError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if input.len() != 4 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BrowserError::InvalidYear(input.to_string()));
    }

    input
        .parse()
        .map(Some)
        .map_err(|_| BrowserError::InvalidYear(input.to_string()))
}

/// The three user-controlled filters. `page` never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    page: u32,
    year: Option<i32>,
    genre: Genre,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            page: 1,
            year: None,
            genre: Genre::All,
        }
    }
}

impl FilterState {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn set_genre(&mut self, genre: Genre) {
        self.genre = genre;
        self.page = 1;
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.page = 1;
    }

    /// No upper bound: paging continues until the catalog returns an empty page.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn to_request(&self) -> FetchMoviesRequest {
        FetchMoviesRequest {
            page: self.page,
            year: self.year,
            genre: self.genre.filter_value().unwrap_or_default().to_string(),
        }
    }
}
