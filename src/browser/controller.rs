//! Filter, pagination and fetch reconciliation for the movie list.
//!
//! Every user action mutates the [`FilterState`] and starts a fetch cycle. The
//! cycle takes a ticket from a counter that is bumped in the same critical
//! section as the state change, and the response is only applied if its ticket
//! is still the newest when it arrives. Older responses are dropped silently.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::api::CatalogApi;
use super::error::BrowserError;
use super::filter::{FilterState, Genre, YEAR_OPTIONS, parse_year};
use super::view::MovieViewModel;
use crate::modules::movies::dto::FetchMoviesRequest;
use crate::modules::movies::model::MovieSummary;

const FALLBACK_ERROR: &str = "Failed to load movies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { movies: Vec<MovieSummary> },
    Failure { message: String },
}

impl From<Result<Vec<MovieSummary>, BrowserError>> for FetchOutcome {
    fn from(result: Result<Vec<MovieSummary>, BrowserError>) -> Self {
        match result {
            Ok(movies) => FetchOutcome::Success { movies },
            Err(err) => {
                let message = err.to_string();
                FetchOutcome::Failure {
                    message: if message.is_empty() {
                        FALLBACK_ERROR.to_string()
                    } else {
                        message
                    },
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Error,
}

/// Whether a completed fetch was allowed to update the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleResult {
    Applied,
    Superseded,
}

#[derive(Debug)]
struct ListState {
    filter: FilterState,
    movies: Vec<MovieSummary>,
    view: ViewState,
    error: String,
    latest_ticket: u64,
}

impl ListState {
    fn begin_fetch(&mut self) -> (u64, FetchMoviesRequest) {
        self.latest_ticket = self.latest_ticket.wrapping_add(1);
        self.view = ViewState::Loading;
        self.error.clear();

        (self.latest_ticket, self.filter.to_request())
    }

    fn complete(&mut self, ticket: u64, outcome: FetchOutcome) -> CycleResult {
        if ticket != self.latest_ticket {
            debug!(ticket, latest = self.latest_ticket, "Dropping superseded response");
            return CycleResult::Superseded;
        }

        match outcome {
            FetchOutcome::Success { movies } => {
                self.movies = movies;
                self.error.clear();
                self.view = ViewState::Idle;
            }
            // The previous list stays on screen next to the message.
            FetchOutcome::Failure { message } => {
                self.error = message;
                self.view = ViewState::Error;
            }
        }

        CycleResult::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearChoice {
    pub year: i32,
    pub selected: bool,
}

/// Read-only copy of the list state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub page: u32,
    pub year: Option<i32>,
    pub genre: Genre,
    pub movies: Vec<MovieSummary>,
    pub view: ViewState,
    pub error: String,
}

impl ListSnapshot {
    pub fn loading(&self) -> bool {
        self.view == ViewState::Loading
    }

    pub fn heading(&self) -> String {
        match self.year {
            Some(year) => format!("{year} {} Movie List", self.genre),
            None => format!("{} Movie List", self.genre),
        }
    }

    /// Entries for the year selector, with the active filter marked.
    pub fn year_choices(&self) -> Vec<YearChoice> {
        YEAR_OPTIONS
            .into_iter()
            .map(|year| YearChoice {
                year,
                selected: self.year == Some(year),
            })
            .collect()
    }

    pub fn view_models(&self) -> Vec<MovieViewModel> {
        self.movies.iter().map(MovieViewModel::from).collect()
    }
}

pub struct ListController {
    api: Arc<dyn CatalogApi>,
    state: Mutex<ListState>,
}

impl ListController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            state: Mutex::new(ListState {
                filter: FilterState::default(),
                movies: Vec::new(),
                view: ViewState::Idle,
                error: String::new(),
                latest_ticket: 0,
            }),
        }
    }

    /// Initial load with default filters.
    pub async fn mount(&self) -> CycleResult {
        self.run_cycle(|_| {}).await
    }

    pub async fn change_genre(&self, genre: Genre) -> CycleResult {
        self.run_cycle(move |filter| filter.set_genre(genre)).await
    }

    /// Invalid input is rejected before any state change or fetch.
    pub async fn change_year(&self, input: &str) -> Result<CycleResult, BrowserError> {
        let year = parse_year(input)?;
        Ok(self.run_cycle(move |filter| filter.set_year(year)).await)
    }

    pub async fn next_page(&self) -> CycleResult {
        self.run_cycle(FilterState::next_page).await
    }

    pub async fn previous_page(&self) -> CycleResult {
        self.run_cycle(FilterState::previous_page).await
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.lock().await;

        ListSnapshot {
            page: state.filter.page(),
            year: state.filter.year(),
            genre: state.filter.genre(),
            movies: state.movies.clone(),
            view: state.view,
            error: state.error.clone(),
        }
    }

    async fn run_cycle<F>(&self, transition: F) -> CycleResult
    where
        F: FnOnce(&mut FilterState) + Send,
    {
        let (ticket, request) = {
            let mut state = self.state.lock().await;
            transition(&mut state.filter);
            state.begin_fetch()
        };

        debug!(ticket, page = request.page, year = ?request.year, genre = %request.genre, "Fetch cycle started");
        let outcome = FetchOutcome::from(self.api.fetch_page(&request).await);

        self.state.lock().await.complete(ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::oneshot;

    type Reply = Result<Vec<MovieSummary>, BrowserError>;

    enum Script {
        Ready(Reply),
        Gated(oneshot::Receiver<Reply>),
    }

    /// Answers calls in order from a script and records every request.
    #[derive(Default)]
    struct ScriptedCatalog {
        script: StdMutex<VecDeque<Script>>,
        requests: StdMutex<Vec<FetchMoviesRequest>>,
    }

    impl ScriptedCatalog {
        fn reply(&self, reply: Reply) {
            self.script.lock().unwrap().push_back(Script::Ready(reply));
        }

        fn gate(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.script.lock().unwrap().push_back(Script::Gated(rx));
            tx
        }

        fn requests(&self) -> Vec<FetchMoviesRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogApi for ScriptedCatalog {
        async fn fetch_page(&self, request: &FetchMoviesRequest) -> Reply {
            self.requests.lock().unwrap().push(request.clone());
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Script::Ready(reply)) => reply,
                Some(Script::Gated(rx)) => rx.await.unwrap(),
                None => Ok(Vec::new()),
            }
        }
    }

    fn movie(id: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: format!("Movie {id}"),
            poster_path: format!("/{id}.jpg"),
            release_date: "2021-05-01".to_string(),
        }
    }

    fn setup() -> (Arc<ScriptedCatalog>, ListController) {
        let catalog = Arc::new(ScriptedCatalog::default());
        let controller = ListController::new(catalog.clone());
        (catalog, controller)
    }

    async fn wait_for_calls(catalog: &ScriptedCatalog, count: usize) {
        while catalog.requests().len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn mount_fetches_first_page_with_defaults() {
        let (catalog, controller) = setup();
        catalog.reply(Ok(vec![movie("a"), movie("b")]));

        let result = controller.mount().await;

        assert_eq!(result, CycleResult::Applied);
        assert_eq!(catalog.requests(), vec![FetchMoviesRequest {
            page: 1,
            year: None,
            genre: String::new(),
        }]);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.movies, vec![movie("a"), movie("b")]);
        assert_eq!(snapshot.view, ViewState::Idle);
        assert!(snapshot.error.is_empty());
        assert_eq!(snapshot.heading(), "All Movie List");
    }

    #[tokio::test]
    async fn genre_all_is_never_forwarded() {
        let (catalog, controller) = setup();

        for genre in Genre::OPTIONS {
            controller.change_genre(genre).await;
        }

        let genres: Vec<String> = catalog.requests().into_iter().map(|r| r.genre).collect();
        assert_eq!(genres, vec!["", "Animation", "Comedy", "Fantasy"]);
    }

    #[tokio::test]
    async fn previous_page_floors_at_one() {
        let (catalog, controller) = setup();

        for _ in 0..3 {
            controller.previous_page().await;
        }

        assert_eq!(controller.snapshot().await.page, 1);
        assert!(catalog.requests().iter().all(|r| r.page == 1));
    }

    #[tokio::test]
    async fn filter_changes_reset_page() {
        let (catalog, controller) = setup();
        for _ in 0..4 {
            controller.next_page().await;
        }
        assert_eq!(controller.snapshot().await.page, 5);

        controller.change_genre(Genre::Comedy).await;
        assert_eq!(controller.snapshot().await.page, 1);

        controller.next_page().await;
        controller.change_year("2021").await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.page, 1);
        assert_eq!(snapshot.heading(), "2021 Comedy Movie List");
        let last = catalog.requests().pop().unwrap();
        assert_eq!(last, FetchMoviesRequest {
            page: 1,
            year: Some(2021),
            genre: "Comedy".to_string(),
        });
    }

    #[tokio::test]
    async fn year_choices_mark_active_filter() {
        let (_catalog, controller) = setup();

        let choices = controller.snapshot().await.year_choices();
        assert_eq!(choices.len(), YEAR_OPTIONS.len());
        assert!(choices.iter().all(|choice| !choice.selected));

        controller.change_year("2022").await.unwrap();

        let selected: Vec<i32> = controller
            .snapshot()
            .await
            .year_choices()
            .into_iter()
            .filter(|choice| choice.selected)
            .map(|choice| choice.year)
            .collect();
        assert_eq!(selected, vec![2022]);
    }

    #[tokio::test]
    async fn clearing_year_sends_null() {
        let (catalog, controller) = setup();
        controller.change_year("2020").await.unwrap();

        controller.change_year("").await.unwrap();

        assert_eq!(catalog.requests().pop().unwrap().year, None);
        assert_eq!(controller.snapshot().await.year, None);
    }

    #[tokio::test]
    async fn invalid_year_changes_nothing() {
        let (catalog, controller) = setup();
        controller.next_page().await;

        let err = controller.change_year("20x1").await.unwrap_err();

        assert!(matches!(err, BrowserError::InvalidYear(_)));
        assert_eq!(catalog.requests().len(), 1);
        assert_eq!(controller.snapshot().await.page, 2);
    }

    #[tokio::test]
    async fn last_request_wins() {
        let (catalog, controller) = setup();
        let controller = Arc::new(controller);
        let gate_a = catalog.gate();
        let gate_b = catalog.gate();

        let slow = tokio::spawn({
            let controller = controller.clone();
            async move { controller.change_genre(Genre::Comedy).await }
        });
        wait_for_calls(&catalog, 1).await;
        let fast = tokio::spawn({
            let controller = controller.clone();
            async move { controller.change_genre(Genre::Fantasy).await }
        });
        wait_for_calls(&catalog, 2).await;

        gate_b.send(Ok(vec![movie("fantasy")])).unwrap();
        assert_eq!(fast.await.unwrap(), CycleResult::Applied);
        gate_a.send(Ok(vec![movie("comedy")])).unwrap();
        assert_eq!(slow.await.unwrap(), CycleResult::Superseded);

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.movies, vec![movie("fantasy")]);
        assert_eq!(snapshot.genre, Genre::Fantasy);
        assert_eq!(snapshot.view, ViewState::Idle);
        assert!(snapshot.error.is_empty());
    }

    #[tokio::test]
    async fn late_failure_of_superseded_request_is_ignored() {
        let (catalog, controller) = setup();
        let controller = Arc::new(controller);
        let gate_a = catalog.gate();
        catalog.reply(Ok(vec![movie("page-2")]));

        let slow = tokio::spawn({
            let controller = controller.clone();
            async move { controller.mount().await }
        });
        wait_for_calls(&catalog, 1).await;
        assert_eq!(controller.next_page().await, CycleResult::Applied);

        gate_a
            .send(Err(BrowserError::Status(StatusCode::INTERNAL_SERVER_ERROR)))
            .unwrap();
        assert_eq!(slow.await.unwrap(), CycleResult::Superseded);

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.movies, vec![movie("page-2")]);
        assert!(snapshot.error.is_empty());
    }

    #[tokio::test]
    async fn loading_keeps_previous_list_and_clears_error() {
        let (catalog, controller) = setup();
        let controller = Arc::new(controller);
        catalog.reply(Ok(vec![movie("a")]));
        catalog.reply(Err(BrowserError::Status(StatusCode::BAD_GATEWAY)));
        controller.mount().await;
        controller.next_page().await;
        assert!(!controller.snapshot().await.error.is_empty());

        let gate = catalog.gate();
        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.next_page().await }
        });
        wait_for_calls(&catalog, 3).await;

        let snapshot = controller.snapshot().await;
        assert!(snapshot.loading());
        assert!(snapshot.error.is_empty());
        assert_eq!(snapshot.movies, vec![movie("a")]);

        gate.send(Ok(vec![movie("c")])).unwrap();
        pending.await.unwrap();
        assert_eq!(controller.snapshot().await.movies, vec![movie("c")]);
    }

    #[tokio::test]
    async fn failure_keeps_stale_list() {
        let (catalog, controller) = setup();
        catalog.reply(Ok(vec![movie("a"), movie("b")]));
        catalog.reply(Err(BrowserError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        controller.mount().await;

        let result = controller.change_genre(Genre::Animation).await;

        assert_eq!(result, CycleResult::Applied);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.view, ViewState::Error);
        assert_eq!(snapshot.error, "Something went wrong while fetching movies");
        assert_eq!(snapshot.movies, vec![movie("a"), movie("b")]);
        assert_eq!(snapshot.view_models()[0].release_year, "2021");
    }

    #[test]
    fn failure_message_is_never_empty() {
        let outcome = FetchOutcome::from(Err(BrowserError::InvalidYear(String::new())));

        assert!(matches!(outcome, FetchOutcome::Failure { message } if !message.is_empty()));
    }
}
