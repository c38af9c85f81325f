//! Core types for provider hits and canonical search results.

use serde::{Deserialize, Serialize};

/// Image shown for results whose provider entry carries no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200.png?text=No+Image";

/// One discovered opportunity page, in canonical form.
///
/// Created by the normaliser from a single [`RawHit`] and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title as reported by the provider.
    pub title: String,
    /// Absolute URL of the page. Input to the deduplication key.
    pub link: String,
    /// Text snippet, possibly empty.
    pub snippet: String,
    /// Representative image URL, or [`PLACEHOLDER_IMAGE`].
    pub image: String,
}

/// A single hit as returned by the search provider, before normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawHit {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub link: String,
    /// Snippet text, when the provider sent one.
    pub snippet: Option<String>,
    /// Candidate image URLs in priority order.
    pub image_candidates: Vec<String>,
}

/// One page of provider output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Hits in provider ranking order.
    pub hits: Vec<RawHit>,
    /// Approximate total number of results the provider claims to have.
    pub total_results: u64,
}
