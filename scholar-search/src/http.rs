//! Shared HTTP client for provider requests.
//!
//! Provides a configured [`reqwest::Client`] and a mapping from transport
//! errors onto [`SearchError`] variants.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// User-Agent sent when the config does not name one.
pub const DEFAULT_USER_AGENT: &str = concat!("scholar-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for provider requests.
///
/// The client has:
/// - Timeout from config
/// - Custom or default User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Classify a transport error.
///
/// The request URL is stripped first: it carries the API key.
pub fn classify_error(err: reqwest::Error) -> SearchError {
    let err = err.without_url();
    if err.is_timeout() {
        SearchError::Timeout(err.to_string())
    } else if err.is_decode() {
        SearchError::Parse(err.to_string())
    } else {
        SearchError::Http(err.to_string())
    }
}
