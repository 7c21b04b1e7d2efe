//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! enrollment window test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built anchor dates and state groupings
//! - `builders`: Builder patterns for rules and rule catalogs
//! - `assertions`: Custom assertion helpers for window decisions
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
