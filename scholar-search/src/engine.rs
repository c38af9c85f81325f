//! Trait definition for the search provider boundary.
//!
//! The pagination state machine talks to a provider only through
//! [`SearchProvider`], so tests and caches can stand in for the real
//! Google Custom Search client.

use std::future::Future;

use crate::error::SearchError;
use crate::types::SearchPage;

/// A paged search backend.
///
/// Implementors execute exactly one request per call and report every
/// transport or decoding problem as a [`SearchError`]. Recovery is the
/// caller's job.
///
/// All implementations must be `Send + Sync`.
pub trait SearchProvider: Send + Sync {
    /// Fetch one page of results.
    ///
    /// # Arguments
    ///
    /// * `query` - The refined query string, passed through untouched.
    /// * `start` - 1-based offset into the provider's result ordering.
    /// * `num` - Number of results requested.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response cannot
    /// be decoded.
    fn fetch_page(
        &self,
        query: &str,
        start: u32,
        num: u32,
    ) -> impl Future<Output = Result<SearchPage, SearchError>> + Send;

    /// Human-readable provider name for logs.
    fn name(&self) -> &'static str;
}
