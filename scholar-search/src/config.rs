//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the provider endpoint, credentials, page size,
//! timeouts and caching. It is embedded as the `[search]` table of the
//! application config file.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::orchestrator::pagination::DEFAULT_PAGE_SIZE;

/// Google Custom Search JSON API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The provider refuses pages larger than this.
pub const MAX_PAGE_SIZE: u32 = 10;

/// Configuration for the search provider and pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider endpoint URL.
    pub endpoint: String,
    /// Provider API key. Falls back to `GOOGLE_API_KEY` when empty.
    pub api_key: String,
    /// Programmable search engine id. Falls back to `CSE_ID` when empty.
    pub engine_id: String,
    /// Results requested per page; the cursor advances by this much.
    pub page_size: u32,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// How long successful pages are cached in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: String::new(),
            engine_id: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 10,
            cache_ttl_seconds: 600,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `page_size` is within `1..=MAX_PAGE_SIZE`
    /// - `timeout_seconds` is greater than 0
    /// - `endpoint`, `api_key` and `engine_id` are not blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(SearchError::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.endpoint.trim().is_empty() {
            return Err(SearchError::Config("endpoint is empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Config("missing API key".into()));
        }
        if self.engine_id.trim().is_empty() {
            return Err(SearchError::Config("missing search engine id".into()));
        }
        Ok(())
    }
}
