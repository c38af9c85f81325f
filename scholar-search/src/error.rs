//! Error types for the scholar-search crate.
//!
//! All errors use stable string messages suitable for display to users.
//! No API keys appear in error messages.

/// Errors that can occur while refining, fetching, or paginating a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The user input was rejected before anything was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// "Load more" was requested while no further page is on offer.
    #[error("no more pages: cursor {cursor} is past total {total_available}")]
    NoMorePages {
        /// Cursor position at the time of the request.
        cursor: u32,
        /// Last total-count reported by the provider.
        total_available: u64,
    },

    /// The provider did not answer within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// An HTTP request to the provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` for failures of the search provider itself.
    ///
    /// These are recovered as an empty page by the pagination state machine.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Http(_) | Self::Parse(_))
    }
}

/// Convenience type alias for scholar-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
