//! Enrollment domain errors
//!
//! Window decisions never fail: unknown states and rule types without a
//! bounded window are ordinary outcomes. These errors only arise while a
//! rule catalog is being built or loaded.

use thiserror::Error;

/// Errors that can occur while assembling a rule catalog
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// A state appears more than once in a rule set
    #[error("Duplicate rule for state {0}")]
    DuplicateState(String),

    /// A rule definition is internally inconsistent
    #[error("Invalid rule for state {state}: {reason}")]
    InvalidRule {
        state: String,
        reason: String,
    },

    /// Rules document could not be parsed
    #[error("Failed to parse rules: {0}")]
    Parse(String),

    /// Rules file or environment configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl EnrollmentError {
    /// Creates an invalid rule error
    pub fn invalid_rule(state: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        EnrollmentError::InvalidRule {
            state: state.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate state error
    pub fn duplicate_state(state: impl std::fmt::Display) -> Self {
        EnrollmentError::DuplicateState(state.to_string())
    }
}
