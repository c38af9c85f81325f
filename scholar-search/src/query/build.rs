//! Composition of the structured provider query.

use std::fmt;

use crate::error::SearchError;

use super::classify::{classify, Classification};

/// Negative terms appended to every query. They keep funding, job, forum,
/// visa and PDF-only pages out of the result set.
pub const EXCLUSIONS: &str = r#"-"financial aid" -"scholarships" -"funding" -"jobs" -"forum" -"application tips" -"visa" -pdf"#;

/// The query string sent to the provider for one search session.
///
/// Built once from the user's text and reused verbatim for every page of
/// that session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinedQuery {
    base: String,
    classification: Classification,
    rendered: String,
}

impl RefinedQuery {
    /// Classify `base` and compose the provider query.
    ///
    /// Clause order: quoted base query, degree clause, `"University"`,
    /// country clause, site scope, exclusions. Empty clauses are left out.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] if `base` is empty once
    /// whitespace and double quotes are removed.
    pub fn build(base: &str) -> Result<Self, SearchError> {
        let base = base.trim();
        if base.replace('"', "").trim().is_empty() {
            return Err(SearchError::Validation(
                "please enter a search query".into(),
            ));
        }
        let classification = classify(base);
        let rendered = compose(base, &classification);
        Ok(Self {
            base: base.to_owned(),
            classification,
            rendered,
        })
    }

    /// The trimmed user text this query was built from.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Hints the classifier derived from the base text.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The full provider query.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for RefinedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

fn compose(base: &str, classification: &Classification) -> String {
    // Stray quotes would unbalance the phrase.
    let phrase = format!("\"{}\"", base.replace('"', "").trim());
    [
        phrase.as_str(),
        classification.degree_clause(),
        "\"University\"",
        classification.country_clause(),
        classification.site_clause(),
        EXCLUSIONS,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
