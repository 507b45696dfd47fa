//! The headline fetch lifecycle.
//!
//! [`HeadlinesFeed`] owns the whole fetch/filter/pagination state and is the
//! only writer of [`FetchState`]. A fetch cycle has three phases:
//!
//! 1. **issue** — bump the monotonic request counter, enter
//!    `Loading{request_id}`, snapshot the current filters and page;
//! 2. **perform** — build the request (credential checked before any network
//!    activity), GET it, classify transport failures, parse the body;
//! 3. **commit** — apply the outcome only if the issuing request is still
//!    the current one, otherwise discard it silently.
//!
//! The commit gate is the latest-request-wins rule: a slow, superseded
//! response can never overwrite state produced by a newer request. There is
//! no network abort; cancellation is purely logical.
//!
//! State lives behind a `std::sync::Mutex` locked only in the issue and
//! commit phases, never across the network await, so concurrent
//! `begin_fetch` calls interleave freely and simply obsolete one another.

use std::sync::{Mutex, MutexGuard};

use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{Error, FailureReason};
use crate::filters::FilterState;
use crate::models::{Article, ArticleListing};
use crate::pagination::{self, PageMove};
use crate::parser;
use crate::request::{self, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Lifecycle of the current fetch, as seen by the render boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No fetch has been started yet.
    Idle,
    /// A request is in flight. `request_id` identifies the one whose result
    /// is still allowed to commit.
    Loading { request_id: u64 },
    /// The most recent fetch succeeded.
    Success { listing: ArticleListing, page: u32 },
    /// The most recent fetch failed. `message` is the human-readable detail,
    /// `reason` the stable classification tag.
    Failure {
        reason: FailureReason,
        message: String,
        page: u32,
    },
}

impl FetchState {
    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }
}

/// State guarded by the feed's mutex. The lock is held only while reading
/// or writing these fields, never across the network call.
#[derive(Debug)]
struct Shared {
    filters: FilterState,
    page: u32,
    next_request_id: u64,
    state: FetchState,
    /// Last successfully committed listing. Kept readable during `Loading`
    /// for render continuity, and used to derive pagination bounds.
    committed: Option<ArticleListing>,
}

/// Paginated, filterable top-headlines feed.
///
/// The display layer reads snapshots (`state`, `filters`, `page`,
/// `total_pages`, `articles`) and drives the feed through the mutators
/// (`set_country`, `set_category`, `next_page`, `prev_page`, `begin_fetch`).
/// Every operation returns a result or a state update; nothing panics across
/// this boundary.
pub struct HeadlinesFeed {
    http: Client,
    endpoint: Url,
    credential: Option<String>,
    page_size: u32,
    shared: Mutex<Shared>,
}

impl HeadlinesFeed {
    /// Create a feed against the production endpoint with default filters
    /// (`us` / `general`), page 1, and the default page size.
    ///
    /// An absent credential is not rejected here; it surfaces as a
    /// `"configuration"` failure on the first fetch, before any network
    /// call is attempted.
    pub fn new(credential: Option<String>) -> Self {
        let endpoint =
            Url::parse(request::DEFAULT_ENDPOINT).expect("default endpoint URL is valid");
        HeadlinesFeed {
            http: Client::new(),
            endpoint,
            credential,
            page_size: DEFAULT_PAGE_SIZE,
            shared: Mutex::new(Shared {
                filters: FilterState::default(),
                page: 1,
                next_request_id: 0,
                state: FetchState::Idle,
                committed: None,
            }),
        }
    }

    /// Point the feed at a different endpoint (used by tests to target a
    /// local mock server).
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Override the page size, clamped to the upstream bounds.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Replace the starting filters, e.g. from CLI arguments.
    pub fn with_filters(self, filters: FilterState) -> Self {
        self.locked().filters = filters;
        self
    }

    /// Start reading from a specific page instead of page 1.
    pub fn with_page(self, page: u32) -> Self {
        self.locked().page = page.max(1);
        self
    }

    /// Fetch the current page with the current filters.
    ///
    /// Issues a fresh request id, transitions to `Loading`, performs the
    /// request, and commits the outcome under the latest-request-wins rule.
    /// Calling this again before a prior call resolves just bumps the id and
    /// obsoletes the earlier in-flight request.
    ///
    /// Returns the state after this request resolved. When the result was
    /// discarded as stale, that is whatever newer state won.
    #[instrument(level = "info", skip(self))]
    pub async fn begin_fetch(&self) -> FetchState {
        let (request_id, filters, page) = self.issue();
        let outcome = self.perform(&filters, page).await;
        self.commit(request_id, page, outcome)
    }

    /// Change the country filter. Invalid codes are rejected before any
    /// state is touched; a valid change resets the page to 1 and starts a
    /// new fetch cycle.
    pub async fn set_country(&self, code: &str) -> Result<FetchState, Error> {
        {
            let mut shared = self.locked();
            let mut filters = shared.filters.clone();
            filters.set_country(code)?;
            shared.filters = filters;
            shared.page = 1;
        }
        Ok(self.begin_fetch().await)
    }

    /// Change the category filter. Same contract as [`Self::set_country`].
    pub async fn set_category(&self, name: &str) -> Result<FetchState, Error> {
        {
            let mut shared = self.locked();
            let mut filters = shared.filters.clone();
            filters.set_category(name)?;
            shared.filters = filters;
            shared.page = 1;
        }
        Ok(self.begin_fetch().await)
    }

    /// Advance one page if the last known total allows it, then fetch.
    ///
    /// Past the last page this is a no-op returning [`PageMove::Boundary`],
    /// not an error. With no successful fetch yet the total is unknown and
    /// the advance is always allowed.
    pub async fn next_page(&self) -> PageMove {
        let step = {
            let mut shared = self.locked();
            let total = shared.committed.as_ref().map(|l| l.total_results);
            match pagination::next_page(shared.page, total, self.page_size) {
                PageMove::Moved(page) => {
                    shared.page = page;
                    PageMove::Moved(page)
                }
                PageMove::Boundary => PageMove::Boundary,
            }
        };
        if let PageMove::Moved(_) = step {
            self.begin_fetch().await;
        }
        step
    }

    /// Step back one page if not already at page 1, then fetch.
    pub async fn prev_page(&self) -> PageMove {
        let step = {
            let mut shared = self.locked();
            match pagination::prev_page(shared.page) {
                PageMove::Moved(page) => {
                    shared.page = page;
                    PageMove::Moved(page)
                }
                PageMove::Boundary => PageMove::Boundary,
            }
        };
        if let PageMove::Moved(_) = step {
            self.begin_fetch().await;
        }
        step
    }

    /// Snapshot of the current lifecycle state.
    pub fn state(&self) -> FetchState {
        self.locked().state.clone()
    }

    /// Snapshot of the current filter selection.
    pub fn filters(&self) -> FilterState {
        self.locked().filters.clone()
    }

    /// The current page number (>= 1).
    pub fn page(&self) -> u32 {
        self.locked().page
    }

    /// The configured page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page count derived from the last successful fetch, or `None` while
    /// the total is still unknown.
    pub fn total_pages(&self) -> Option<u64> {
        self.locked()
            .committed
            .as_ref()
            .map(|l| pagination::total_pages(l.total_results, self.page_size))
    }

    /// Articles from the last successful fetch. Stays readable while a new
    /// request is loading, so the display layer can keep rendering the
    /// (logically stale) previous page.
    pub fn articles(&self) -> Vec<Article> {
        self.locked()
            .committed
            .as_ref()
            .map(|l| l.articles.clone())
            .unwrap_or_default()
    }

    fn locked(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().expect("feed state lock poisoned")
    }

    /// Phase 1: obtain a fresh request id and enter `Loading`.
    fn issue(&self) -> (u64, FilterState, u32) {
        let mut shared = self.locked();
        shared.next_request_id += 1;
        let request_id = shared.next_request_id;
        shared.state = FetchState::Loading { request_id };
        debug!(
            request_id,
            page = shared.page,
            country = %shared.filters.country(),
            category = %shared.filters.category(),
            "issued fetch"
        );
        (request_id, shared.filters.clone(), shared.page)
    }

    /// Phase 2: the network round trip. The only suspension point in the
    /// cycle; no lock is held here.
    async fn perform(&self, filters: &FilterState, page: u32) -> Result<ArticleListing, Error> {
        let credential = self.credential.as_deref().unwrap_or_default();
        let url =
            request::build_request(&self.endpoint, filters, page, self.page_size, credential)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("HTTP {status}")));
        }
        let body = response.text().await?;
        parser::parse_listing(&body)
    }

    /// Phase 3: commit the outcome, unless a newer request superseded this
    /// one while it was in flight.
    fn commit(
        &self,
        request_id: u64,
        page: u32,
        outcome: Result<ArticleListing, Error>,
    ) -> FetchState {
        let mut shared = self.locked();
        let still_current = matches!(
            shared.state,
            FetchState::Loading { request_id: current } if current == request_id
        );
        if !still_current {
            debug!(request_id, "discarding stale fetch result");
            return shared.state.clone();
        }

        match outcome {
            Ok(listing) => {
                info!(
                    request_id,
                    page,
                    count = listing.articles.len(),
                    total_results = listing.total_results,
                    "fetch committed"
                );
                shared.committed = Some(listing.clone());
                shared.state = FetchState::Success { listing, page };
            }
            Err(e) => {
                warn!(request_id, page, reason = %e.reason(), error = %e, "fetch failed");
                shared.state = FetchState::Failure {
                    reason: e.reason(),
                    message: e.to_string(),
                    page,
                };
            }
        }
        shared.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn feed_for(server: &MockServer, credential: Option<&str>) -> HeadlinesFeed {
        let endpoint = Url::parse(&format!("{}/v2/top-headlines", server.uri())).unwrap();
        HeadlinesFeed::new(credential.map(String::from)).with_endpoint(endpoint)
    }

    fn listing_body(titles: &[&str], total_results: u64) -> String {
        let articles: Vec<serde_json::Value> = titles
            .iter()
            .map(|t| {
                serde_json::json!({
                    "title": t,
                    "description": format!("About {t}."),
                    "url": format!("https://example.com/{t}"),
                    "urlToImage": "https://example.com/img.jpg",
                    "publishedAt": "2024-11-05T08:30:00Z"
                })
            })
            .collect();
        serde_json::json!({
            "status": "ok",
            "totalResults": total_results,
            "articles": articles
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_begin_fetch_success_commits_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/top-headlines"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(listing_body(&["a", "b"], 25)),
            )
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        let state = feed.begin_fetch().await;

        match state {
            FetchState::Success { listing, page } => {
                assert_eq!(page, 1);
                assert_eq!(listing.articles.len(), 2);
                assert_eq!(listing.total_results, 25);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(feed.total_pages(), Some(3));
        assert_eq!(feed.articles().len(), 2);
    }

    #[tokio::test]
    async fn test_http_500_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        let state = feed.begin_fetch().await;

        match state {
            FetchState::Failure { reason, page, .. } => {
                assert_eq!(reason, FailureReason::Transport);
                assert_eq!(reason.as_str(), "transport");
                assert_eq!(page, 1);
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_network_call() {
        let server = MockServer::start().await;
        let feed = feed_for(&server, None);

        let state = feed.begin_fetch().await;
        match state {
            FetchState::Failure { reason, .. } => {
                assert_eq!(reason, FailureReason::Configuration);
            }
            other => panic!("expected configuration failure, got {other:?}"),
        }

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty(), "no network call may be attempted");
    }

    #[tokio::test]
    async fn test_error_envelope_is_malformed_response_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"error","code":"apiKeyExhausted","message":"quota"}"#,
            ))
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        let state = feed.begin_fetch().await;
        match state {
            FetchState::Failure { reason, .. } => {
                assert_eq!(reason, FailureReason::MalformedResponse);
            }
            other => panic!("expected malformed-response failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_results_page_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(&[], 0)))
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        let state = feed.begin_fetch().await;
        match state {
            FetchState::Success { listing, page } => {
                assert!(listing.articles.is_empty());
                assert_eq!(listing.total_results, 0);
                assert_eq!(page, 1);
            }
            other => panic!("expected success on empty page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_filter_mutation_resets_page_and_refetches() {
        let server = MockServer::start().await;
        // Only the post-mutation request shape is answered; a fetch with any
        // other page or category would miss and fail the assertion below.
        Mock::given(method("GET"))
            .and(query_param("category", "sports"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(&["s"], 1)))
            .expect(1)
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key")).with_page(5);
        assert_eq!(feed.page(), 5);

        let state = feed.set_category("sports").await.unwrap();
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.filters().category().as_str(), "sports");
        assert!(matches!(state, FetchState::Success { page: 1, .. }));
    }

    #[tokio::test]
    async fn test_invalid_filter_rejected_before_any_fetch() {
        let server = MockServer::start().await;
        let feed = feed_for(&server, Some("key")).with_page(4);

        let err = feed.set_country("usa").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // Rejected input mutates nothing and fetches nothing.
        assert_eq!(feed.page(), 4);
        assert_eq!(feed.filters().country(), "us");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_commit_is_discarded() {
        let server = MockServer::start().await;
        let feed = feed_for(&server, Some("key"));

        let (old_id, _, old_page) = feed.issue();
        let (new_id, _, new_page) = feed.issue();

        let newer = ArticleListing {
            articles: vec![],
            total_results: 7,
        };
        let committed = feed.commit(new_id, new_page, Ok(newer.clone()));
        assert!(matches!(committed, FetchState::Success { .. }));

        // The older request resolves afterwards; its result must be dropped.
        let stale = ArticleListing {
            articles: vec![],
            total_results: 99,
        };
        let after = feed.commit(old_id, old_page, Ok(stale));
        match after {
            FetchState::Success { listing, .. } => assert_eq!(listing, newer),
            other => panic!("stale commit overwrote state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_failure_cannot_overwrite_newer_success() {
        let server = MockServer::start().await;
        let feed = feed_for(&server, Some("key"));

        let (old_id, _, old_page) = feed.issue();
        let (new_id, _, new_page) = feed.issue();

        feed.commit(
            new_id,
            new_page,
            Ok(ArticleListing {
                articles: vec![],
                total_results: 3,
            }),
        );
        let after = feed.commit(old_id, old_page, Err(Error::Transport("HTTP 500".into())));
        assert!(matches!(after, FetchState::Success { .. }));
    }

    #[tokio::test]
    async fn test_latest_request_wins_with_slow_first_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_body(&["slow"], 100))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(&["fast"], 100)))
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        let slow = feed.begin_fetch();
        let fast = async {
            // Let the first request get issued, then supersede it.
            tokio::time::sleep(Duration::from_millis(50)).await;
            feed.locked().page = 2;
            feed.begin_fetch().await
        };
        let (slow_state, _fast_state) = tokio::join!(slow, fast);

        // The slow resolution reports the winning state, not its own result.
        match &slow_state {
            FetchState::Success { listing, page } => {
                assert_eq!(*page, 2);
                assert_eq!(listing.articles[0].title, "fast");
            }
            other => panic!("expected newer success to win, got {other:?}"),
        }
        assert_eq!(feed.state(), slow_state);
    }

    #[tokio::test]
    async fn test_prior_listing_stays_readable_while_loading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(&["a"], 1)))
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        feed.begin_fetch().await;
        assert_eq!(feed.articles().len(), 1);

        let _ = feed.issue();
        assert!(feed.state().is_loading());
        // Render continuity: the stale listing is still available.
        assert_eq!(feed.articles().len(), 1);
    }

    #[tokio::test]
    async fn test_next_page_bounded_by_total_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(&["x"], 15)))
            .mount(&server)
            .await;

        let feed = feed_for(&server, Some("key"));
        feed.begin_fetch().await;
        assert_eq!(feed.total_pages(), Some(2));

        assert_eq!(feed.next_page().await, PageMove::Moved(2));
        assert_eq!(feed.page(), 2);
        assert_eq!(feed.next_page().await, PageMove::Boundary);
        assert_eq!(feed.page(), 2, "boundary leaves the page unchanged");

        assert_eq!(feed.prev_page().await, PageMove::Moved(1));
        assert_eq!(feed.prev_page().await, PageMove::Boundary);
        assert_eq!(feed.page(), 1);
    }

    #[tokio::test]
    async fn test_request_ids_are_monotonic() {
        let server = MockServer::start().await;
        let feed = feed_for(&server, Some("key"));
        let (a, _, _) = feed.issue();
        let (b, _, _) = feed.issue();
        let (c, _, _) = feed.issue();
        assert!(a < b && b < c);
    }
}
