//! Client side of the movie page: filter state, fetch reconciliation and card view models.

pub mod api;
pub mod controller;
pub mod error;
pub mod filter;
pub mod view;

pub use api::{CatalogApi, ProxyClient};
pub use controller::{CycleResult, FetchOutcome, ListController, ListSnapshot, ViewState, YearChoice};
pub use error::BrowserError;
pub use filter::{FilterState, Genre, YEAR_OPTIONS};
pub use view::MovieViewModel;
