//! Core Kernel - Foundational types and utilities for the enrollment system
//!
//! This crate provides the fundamental building blocks used by the domain crates:
//! - Calendar arithmetic for annually recurring anchor dates
//! - Normalized state code identifiers
//! - Common error types

pub mod temporal;
pub mod identifiers;
pub mod error;

pub use temporal::{DateRange, TemporalError};
pub use identifiers::StateCode;
pub use error::CoreError;
