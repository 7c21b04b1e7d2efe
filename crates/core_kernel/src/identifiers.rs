//! Strongly-typed identifiers for jurisdiction keys
//!
//! Using a newtype wrapper around the two-letter code guarantees that every
//! stored code is normalized, so lookups never depend on caller casing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A normalized two-letter U.S. state code (e.g. `KY`, `NV`)
///
/// Construction trims surrounding whitespace and uppercases the input.
/// Anything that is not exactly two ASCII letters is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode([u8; 2]);

impl StateCode {
    /// Parses and normalizes a state code
    pub fn new(code: &str) -> Result<Self, CoreError> {
        match code.trim().as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => Err(CoreError::validation(format!(
                "state code must be two ASCII letters, got {:?}",
                code
            ))),
        }
    }

    /// Builds a code from two ASCII bytes, usable in constant tables
    pub const fn from_ascii(code: &[u8; 2]) -> Option<Self> {
        let [a, b] = *code;
        if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() {
            Some(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
        } else {
            None
        }
    }

    /// Returns the uppercase code
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StateCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.as_str().to_string()
    }
}

impl PartialEq<&str> for StateCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
