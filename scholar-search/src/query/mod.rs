//! Query refinement: intent classification and provider query composition.

pub mod build;
pub mod classify;

pub use build::{RefinedQuery, EXCLUSIONS};
pub use classify::{classify, Classification, Country, DegreeLevel};
