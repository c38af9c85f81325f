//! Cross-page merge with one result per registrable domain.
//!
//! Previously accumulated results are processed before fresh ones, so a
//! domain already shown to the user is never displaced by a later page.
//! Each result must also look like a program landing page: either its
//! snippet mentions program content or its URL is at most one path
//! segment deep.

use std::collections::HashSet;

use crate::types::SearchResult;

use super::domain::{path_depth, registrable_domain};

/// Snippet keywords that mark a page as program content.
pub const CONTENT_KEYWORDS: &[&str] = &[
    "program",
    "course",
    "curriculum",
    "department",
    "admissions",
    "overview",
];

/// Deepest URL path (in non-empty segments) accepted without a keyword.
const MAX_LANDING_DEPTH: usize = 1;

/// Merge `fresh` into `accumulated`, returning the new accumulated set.
///
/// Single pass over `accumulated` followed by `fresh`:
///
/// 1. The first result seen for a registrable domain claims that domain.
///    Every later result with the same domain is discarded, even if the
///    claiming result is itself rejected in step 2.
/// 2. A claiming result is kept only if [`looks_relevant`] holds.
///
/// Output order follows input order and contains no duplicate domains.
pub fn merge_results(
    accumulated: Vec<SearchResult>,
    fresh: Vec<SearchResult>,
) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(accumulated.len() + fresh.len());

    for result in accumulated.into_iter().chain(fresh) {
        if !seen.insert(registrable_domain(&result.link)) {
            tracing::trace!(link = %result.link, "dropping same-domain duplicate");
            continue;
        }
        if looks_relevant(&result) {
            merged.push(result);
        } else {
            tracing::trace!(link = %result.link, "dropping low-signal result");
        }
    }

    merged
}

/// Content/path heuristic for program landing pages.
///
/// True if the snippet contains one of [`CONTENT_KEYWORDS`]
/// (case-insensitive) or the link has at most one path segment. Links that
/// do not parse only pass on their snippet.
pub fn looks_relevant(result: &SearchResult) -> bool {
    let snippet = result.snippet.to_lowercase();
    if CONTENT_KEYWORDS.iter().any(|kw| snippet.contains(kw)) {
        return true;
    }
    path_depth(&result.link).is_some_and(|depth| depth <= MAX_LANDING_DEPTH)
}
