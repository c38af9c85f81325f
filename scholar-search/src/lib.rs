//! # scholar-search
//!
//! Query refinement and incremental result aggregation for university
//! program search.
//!
//! ## Design
//!
//! - Classifies free-text interests ("MS Physics in USA") into degree and
//!   country hints using ordered, first-match-wins rule tables
//! - Composes one structured provider query per session, with fixed
//!   exclusion terms
//! - Fetches pages from Google Custom Search behind the [`SearchProvider`]
//!   trait, optionally through an in-memory TTL cache
//! - Merges each page into the session's results with one result per
//!   registrable domain and a content/path relevance filter
//! - Drives "load more" through an owned pagination state value
//! - Graceful degradation: a failed page is an empty page, never a crash
//!
//! ## Security
//!
//! - The API key never appears in errors or logs
//! - Queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod types;

pub use cache::CachedProvider;
pub use config::SearchConfig;
pub use engine::SearchProvider;
pub use engines::GoogleCseEngine;
pub use error::{Result, SearchError};
pub use orchestrator::pagination::{
    load_more, start_search, PageReport, PaginationState, SessionPhase, Transition,
};
pub use query::RefinedQuery;
pub use types::{RawHit, SearchPage, SearchResult, PLACEHOLDER_IMAGE};

/// Build the default provider stack for `config`: the Google Custom Search
/// client behind a page cache.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the config is invalid, or
/// [`SearchError::Http`] if the HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scholar_search::Result<()> {
/// let config = scholar_search::SearchConfig {
///     api_key: "key".into(),
///     engine_id: "cx".into(),
///     ..Default::default()
/// };
/// let provider = scholar_search::build_provider(&config)?;
/// let t = scholar_search::start_search(
///     &provider,
///     scholar_search::PaginationState::idle(),
///     "MS Physics in USA",
///     config.page_size,
/// )
/// .await;
/// for result in t.state.accumulated() {
///     println!("{}: {}", result.title, result.link);
/// }
/// # Ok(())
/// # }
/// ```
pub fn build_provider(config: &SearchConfig) -> Result<CachedProvider<GoogleCseEngine>> {
    let engine = GoogleCseEngine::new(config)?;
    Ok(CachedProvider::new(engine, config.cache_ttl_seconds))
}
