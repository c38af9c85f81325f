//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchProvider`].

pub mod google_cse;

pub use google_cse::GoogleCseEngine;
