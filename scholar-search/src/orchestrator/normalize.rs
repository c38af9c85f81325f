//! Mapping of raw provider hits into canonical results.

use crate::types::{RawHit, SearchResult, PLACEHOLDER_IMAGE};

/// Convert one provider hit into a [`SearchResult`].
///
/// The first non-blank image candidate wins; without one the placeholder
/// image is used. A missing snippet becomes an empty string.
pub fn normalize_hit(hit: RawHit) -> SearchResult {
    let image = hit
        .image_candidates
        .into_iter()
        .find(|candidate| !candidate.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned());

    SearchResult {
        title: hit.title,
        link: hit.link,
        snippet: hit.snippet.unwrap_or_default(),
        image,
    }
}

/// Normalise a page of hits, preserving provider order.
pub fn normalize_hits(hits: Vec<RawHit>) -> Vec<SearchResult> {
    hits.into_iter().map(normalize_hit).collect()
}
