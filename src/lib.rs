//! ScholarVerse: find university programs from a free-text study interest.
//!
//! The search core lives in the `scholar-search` workspace crate. This
//! crate adds the application around it:
//!
//! - **Config**: TOML file plus environment secrets
//! - **Session**: one user's owned pagination state and actions
//! - **Analysis**: profile-to-opportunity matching via an external webhook
//! - **Render**: plain-text result cards for the CLI

pub mod analysis;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use analysis::{AnalysisClient, AnalysisError, Feedback, Profile};
pub use config::ScholarConfig;
pub use error::{Result, ScholarError};
pub use session::Session;
