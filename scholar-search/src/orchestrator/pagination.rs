//! Pagination state machine for one search session.
//!
//! [`PaginationState`] is an owned value. Each transition takes it by
//! value and hands it back inside a [`Transition`], so there is no shared
//! mutable session state and a caller cannot run two transitions on the
//! same session at once.
//!
//! ```text
//!   Idle ──start_search──▶ Active ──load_more──▶ Active
//!                            ▲                     │
//!                            └─────start_search────┘  (resets the session)
//! ```

use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::query::RefinedQuery;
use crate::types::SearchResult;

use super::dedup::merge_results;
use super::normalize::normalize_hits;

/// Page size used by [`PaginationState::default`].
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Coarse session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No search has been issued yet.
    Idle,
    /// A search session is running.
    Active,
}

/// Cursor, totals and accumulated results of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    query: Option<RefinedQuery>,
    page_size: u32,
    cursor: u32,
    total_available: u64,
    accumulated: Vec<SearchResult>,
    session_active: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            query: None,
            page_size: DEFAULT_PAGE_SIZE,
            cursor: 1,
            total_available: 0,
            accumulated: Vec::new(),
            session_active: false,
        }
    }
}

impl PaginationState {
    /// A fresh idle state.
    pub fn idle() -> Self {
        Self::default()
    }

    /// The refined query of the running session.
    pub fn query(&self) -> Option<&RefinedQuery> {
        self.query.as_ref()
    }

    /// 1-based provider offset of the next page.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Results requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Last total reported by the provider. May be approximate or stale.
    pub fn total_available(&self) -> u64 {
        self.total_available
    }

    /// Deduplicated results in discovery order.
    pub fn accumulated(&self) -> &[SearchResult] {
        &self.accumulated
    }

    /// Whether a search has been issued.
    pub fn is_active(&self) -> bool {
        self.session_active
    }

    /// [`SessionPhase`] view of [`Self::is_active`].
    pub fn phase(&self) -> SessionPhase {
        if self.session_active {
            SessionPhase::Active
        } else {
            SessionPhase::Idle
        }
    }

    /// Whether "load more" should be offered.
    pub fn can_load_more(&self) -> bool {
        self.session_active && u64::from(self.cursor) <= self.total_available
    }
}

/// What one fetch did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Hits the provider returned for this page.
    pub fetched: usize,
    /// Growth of the accumulated set after dedup and filtering.
    pub added: usize,
    /// Provider failure that was recovered as an empty page.
    pub failure: Option<SearchError>,
}

impl PageReport {
    /// True when the page came back empty because the provider failed.
    pub fn is_soft_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Result of a state-machine transition.
///
/// `report` is `Err` when the action was rejected; `state` is then the
/// input state, untouched.
#[derive(Debug)]
#[must_use]
pub struct Transition {
    /// State after the action.
    pub state: PaginationState,
    /// What the action did, or why it was refused.
    pub report: Result<PageReport, SearchError>,
}

impl Transition {
    fn rejected(state: PaginationState, err: SearchError) -> Self {
        Self {
            state,
            report: Err(err),
        }
    }
}

/// Start a new session for `base_query` and fetch its first page.
///
/// Rejects blank input with [`SearchError::Validation`] and a zero page
/// size with [`SearchError::Config`]; in both cases `state` is returned
/// unchanged. Otherwise the old session is discarded.
pub async fn start_search<P: SearchProvider>(
    provider: &P,
    state: PaginationState,
    base_query: &str,
    page_size: u32,
) -> Transition {
    if page_size == 0 {
        return Transition::rejected(
            state,
            SearchError::Config("page_size must be greater than 0".into()),
        );
    }
    let query = match RefinedQuery::build(base_query) {
        Ok(query) => query,
        Err(err) => return Transition::rejected(state, err),
    };

    tracing::debug!(
        degree = ?query.classification().degree,
        country = ?query.classification().country,
        "starting search session"
    );
    tracing::trace!(query = %query, "refined query");

    let fresh = PaginationState {
        query: Some(query),
        page_size,
        cursor: 1,
        total_available: 0,
        accumulated: Vec::new(),
        session_active: true,
    };
    let (state, report) = fetch_next(provider, fresh).await;
    Transition {
        state,
        report: Ok(report),
    }
}

/// Fetch the next page of the running session.
///
/// Rejected with [`SearchError::NoMorePages`] unless
/// [`PaginationState::can_load_more`] holds.
pub async fn load_more<P: SearchProvider>(provider: &P, state: PaginationState) -> Transition {
    if !state.can_load_more() {
        let err = SearchError::NoMorePages {
            cursor: state.cursor,
            total_available: state.total_available,
        };
        return Transition::rejected(state, err);
    }
    let (state, report) = fetch_next(provider, state).await;
    Transition {
        state,
        report: Ok(report),
    }
}

/// One provider round-trip. The cursor advances whatever the outcome.
async fn fetch_next<P: SearchProvider>(
    provider: &P,
    mut state: PaginationState,
) -> (PaginationState, PageReport) {
    let outcome = match &state.query {
        Some(query) => {
            provider
                .fetch_page(query.as_str(), state.cursor, state.page_size)
                .await
        }
        None => Err(SearchError::Validation("no active search".into())),
    };

    let before = state.accumulated.len();
    let report = match outcome {
        Ok(page) => {
            let fetched = page.hits.len();
            let fresh = normalize_hits(page.hits);
            state.accumulated = merge_results(std::mem::take(&mut state.accumulated), fresh);
            state.total_available = page.total_results;
            let added = state.accumulated.len().saturating_sub(before);
            tracing::debug!(
                provider = provider.name(),
                cursor = state.cursor,
                fetched,
                added,
                total = state.total_available,
                "page merged"
            );
            PageReport {
                fetched,
                added,
                failure: None,
            }
        }
        Err(err) => {
            tracing::warn!(
                provider = provider.name(),
                cursor = state.cursor,
                error = %err,
                "page fetch failed, continuing with an empty page"
            );
            PageReport {
                fetched: 0,
                added: 0,
                failure: Some(err),
            }
        }
    };

    state.cursor = state.cursor.saturating_add(state.page_size);
    (state, report)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::types::{RawHit, SearchPage};

    /// Replays canned responses and records each request.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<SearchPage, SearchError>>>,
        requests: Mutex<Vec<(String, u32, u32)>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<SearchPage, SearchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, u32, u32)> {
            self.requests.lock().expect("lock").clone()
        }
    }

    impl SearchProvider for ScriptedProvider {
        async fn fetch_page(
            &self,
            query: &str,
            start: u32,
            num: u32,
        ) -> Result<SearchPage, SearchError> {
            self.requests
                .lock()
                .expect("lock")
                .push((query.to_owned(), start, num));
            self.responses
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or_else(|| Ok(SearchPage::default()))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn page(links: &[&str], total: u64) -> Result<SearchPage, SearchError> {
        Ok(SearchPage {
            hits: links
                .iter()
                .map(|link| RawHit {
                    title: format!("Title {link}"),
                    link: (*link).to_owned(),
                    snippet: Some("Graduate program overview".into()),
                    image_candidates: vec![],
                })
                .collect(),
            total_results: total,
        })
    }

    #[test]
    fn default_state_is_idle() {
        let state = PaginationState::idle();
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.total_available(), 0);
        assert!(state.accumulated().is_empty());
        assert!(state.query().is_none());
        assert!(!state.can_load_more());
    }

    #[tokio::test]
    async fn start_search_fetches_first_page() {
        let provider = ScriptedProvider::new(vec![page(
            &["https://mit.edu/physics", "https://stanford.edu/physics"],
            40,
        )]);
        let t = start_search(&provider, PaginationState::idle(), "MS Physics in USA", 6).await;
        let report = t.report.expect("accepted");
        assert_eq!(report.fetched, 2);
        assert_eq!(report.added, 2);
        assert!(!report.is_soft_failure());

        let state = t.state;
        assert_eq!(state.phase(), SessionPhase::Active);
        assert_eq!(state.cursor(), 7);
        assert_eq!(state.total_available(), 40);
        assert_eq!(state.accumulated().len(), 2);
        assert!(state.can_load_more());

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, 1);
        assert_eq!(requests[0].2, 6);
        assert!(requests[0].0.starts_with(r#""MS Physics in USA""#));
    }

    #[tokio::test]
    async fn blank_query_rejected_without_state_change() {
        let provider = ScriptedProvider::new(vec![page(&["https://mit.edu/"], 10)]);
        let t = start_search(&provider, PaginationState::idle(), "physics", 6).await;
        let before = t.state.clone();

        let t = start_search(&provider, t.state, "   ", 6).await;
        assert!(matches!(t.report, Err(SearchError::Validation(_))));
        assert_eq!(t.state, before);
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn zero_page_size_rejected() {
        let provider = ScriptedProvider::new(vec![]);
        let t = start_search(&provider, PaginationState::idle(), "physics", 0).await;
        assert!(matches!(t.report, Err(SearchError::Config(_))));
        assert_eq!(t.state, PaginationState::idle());
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn load_more_reuses_query_and_advances_cursor() {
        let provider = ScriptedProvider::new(vec![
            page(&["https://mit.edu/"], 20),
            page(&["https://www.mit.edu/grad", "https://caltech.edu/"], 20),
        ]);
        let t = start_search(&provider, PaginationState::idle(), "PhD physics", 6).await;
        let t = load_more(&provider, t.state).await;
        let report = t.report.expect("accepted");
        assert_eq!(report.fetched, 2);
        assert_eq!(report.added, 1);

        let state = t.state;
        assert_eq!(state.cursor(), 13);
        let links: Vec<_> = state.accumulated().iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["https://mit.edu/", "https://caltech.edu/"]);

        let requests = provider.requests();
        assert_eq!(requests[0].0, requests[1].0);
        assert_eq!(requests[1].1, 7);
    }

    #[tokio::test]
    async fn provider_failure_is_soft() {
        let provider = ScriptedProvider::new(vec![
            page(&["https://mit.edu/"], 30),
            Err(SearchError::Timeout("10s".into())),
        ]);
        let t = start_search(&provider, PaginationState::idle(), "physics", 6).await;
        let before = t.state.clone();

        let t = load_more(&provider, t.state).await;
        let report = t.report.expect("accepted");
        assert!(report.is_soft_failure());
        assert_eq!(report.failure, Some(SearchError::Timeout("10s".into())));
        assert_eq!(t.state.accumulated(), before.accumulated());
        assert_eq!(t.state.total_available(), before.total_available());
        assert_eq!(t.state.cursor(), before.cursor() + 6);
        assert_eq!(t.state.phase(), SessionPhase::Active);
    }

    #[tokio::test]
    async fn failed_first_page_leaves_total_at_zero() {
        let provider = ScriptedProvider::new(vec![Err(SearchError::Http("503".into()))]);
        let t = start_search(&provider, PaginationState::idle(), "physics", 6).await;
        let report = t.report.expect("accepted");
        assert!(report.is_soft_failure());
        assert!(t.state.is_active());
        assert_eq!(t.state.cursor(), 7);
        assert!(!t.state.can_load_more());
    }

    #[tokio::test]
    async fn load_more_unavailable_past_total() {
        let provider = ScriptedProvider::new(vec![page(&["https://mit.edu/"], 6)]);
        let t = start_search(&provider, PaginationState::idle(), "physics", 6).await;
        assert_eq!(t.state.cursor(), 7);
        assert!(!t.state.can_load_more());

        let before = t.state.clone();
        let t = load_more(&provider, t.state).await;
        assert_eq!(
            t.report.unwrap_err(),
            SearchError::NoMorePages {
                cursor: 7,
                total_available: 6
            }
        );
        assert_eq!(t.state, before);
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn load_more_rejected_while_idle() {
        let provider = ScriptedProvider::new(vec![]);
        let t = load_more(&provider, PaginationState::idle()).await;
        assert!(matches!(t.report, Err(SearchError::NoMorePages { .. })));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn new_search_resets_session() {
        let provider = ScriptedProvider::new(vec![
            page(&["https://mit.edu/"], 50),
            page(&["https://mit.edu/", "https://ox.ac.uk/"], 50),
            page(&["https://utoronto.ca/"], 9),
        ]);
        let t = start_search(&provider, PaginationState::idle(), "physics usa", 6).await;
        let t = load_more(&provider, t.state).await;
        assert_eq!(t.state.cursor(), 13);

        let t = start_search(&provider, t.state, "physics canada", 6).await;
        let state = t.state;
        assert_eq!(state.cursor(), 7);
        assert_eq!(state.total_available(), 9);
        let links: Vec<_> = state.accumulated().iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["https://utoronto.ca/"]);
        assert!(state
            .query()
            .expect("query")
            .as_str()
            .contains("site:.ca"));
    }

    #[tokio::test]
    async fn cursor_never_decreases() {
        let provider = ScriptedProvider::new(vec![
            page(&["https://a.edu/"], 100),
            Err(SearchError::Parse("garbage".into())),
            page(&[], 100),
            Err(SearchError::Http("502".into())),
            page(&["https://b.edu/"], 100),
        ]);
        let mut t = start_search(&provider, PaginationState::idle(), "physics", 5).await;
        let mut last = t.state.cursor();
        for _ in 0..4 {
            t = load_more(&provider, t.state).await;
            assert!(t.report.is_ok());
            assert!(t.state.cursor() > last);
            last = t.state.cursor();
        }
        assert_eq!(last, 26);
        assert_eq!(t.state.accumulated().len(), 2);
    }
}
