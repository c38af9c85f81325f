//! Error types for the scholarverse application.

use crate::analysis::AnalysisError;

/// Top-level error type for the application layer.
#[derive(Debug, thiserror::Error)]
pub enum ScholarError {
    /// Search refinement, provider or pagination error.
    #[error("search error: {0}")]
    Search(#[from] scholar_search::SearchError),

    /// Profile analysis webhook error.
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScholarError>;
