//! One user's search session.
//!
//! [`Session`] owns the provider and the current [`PaginationState`] and
//! exposes the user actions: start a search, load more, submit a profile.
//! Actions take `&mut self`, so a second action cannot start while one is
//! in flight. They are cancellation safe: the state is only replaced once
//! the provider has answered.

use scholar_search::{
    PageReport, PaginationState, SearchProvider, SearchResult, SessionPhase, load_more,
    start_search,
};

use crate::analysis::{AnalysisClient, AnalysisError, Feedback, Profile};
use crate::error::Result;

/// Search session bound to one provider.
pub struct Session<P> {
    provider: P,
    page_size: u32,
    state: PaginationState,
}

impl<P: SearchProvider> Session<P> {
    /// An idle session fetching `page_size` results per page.
    pub fn new(provider: P, page_size: u32) -> Self {
        Self {
            provider,
            page_size,
            state: PaginationState::idle(),
        }
    }

    /// Start a new search, discarding the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScholarError::Search`] if the text is blank. The
    /// session is unchanged in that case. Provider failures are not errors;
    /// they are reported through [`PageReport::failure`].
    pub async fn start_search(&mut self, text: &str) -> Result<PageReport> {
        // Work on a copy so a dropped future leaves the session as it was.
        let state = self.state.clone();
        let transition = start_search(&self.provider, state, text, self.page_size).await;
        self.state = transition.state;
        transition.report.map_err(Into::into)
    }

    /// Fetch the next page of the current search.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScholarError::Search`] if no further page is on offer.
    pub async fn load_more(&mut self) -> Result<PageReport> {
        // Work on a copy so a dropped future leaves the session as it was.
        let state = self.state.clone();
        let transition = load_more(&self.provider, state).await;
        self.state = transition.state;
        transition.report.map_err(Into::into)
    }

    /// Results to display. Empty until the first search.
    pub fn results(&self) -> &[SearchResult] {
        if self.state.is_active() {
            self.state.accumulated()
        } else {
            &[]
        }
    }

    /// Whether a "load more" action should be offered.
    pub fn can_load_more(&self) -> bool {
        self.state.can_load_more()
    }

    /// Idle before the first accepted search, active afterwards.
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Read-only view of the pagination state.
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Submit `profile` with the current results for analysis.
    ///
    /// Leaves the search state untouched whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] from the analysis boundary.
    pub async fn analyze_profile(
        &self,
        client: &AnalysisClient,
        profile: &Profile,
    ) -> std::result::Result<Feedback, AnalysisError> {
        client.analyze(profile, self.results()).await
    }
}
