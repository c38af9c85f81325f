//! Result aggregation: normalisation, domain dedup, filtering, pagination.
//!
//! Each fetched page is normalised into [`crate::types::SearchResult`]
//! values, merged into the session's accumulated set with one result per
//! registrable domain, and filtered by a content/path heuristic. The
//! pagination state machine drives the loop.

pub mod dedup;
pub mod domain;
pub mod normalize;
pub mod pagination;
