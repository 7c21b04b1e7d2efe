//! Enrollment configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::catalog::RuleCatalog;
use crate::error::EnrollmentError;

/// Where the rule catalog comes from
///
/// Read from `ENROLLMENT_`-prefixed environment variables:
///
/// * `ENROLLMENT_RULES_PATH` - rules file replacing the compiled-in table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentConfig {
    /// Rules file; the compiled-in table is used when unset
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
}

impl EnrollmentConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, EnrollmentError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ENROLLMENT"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Builds the catalog this configuration points at
    pub fn build_catalog(&self) -> Result<RuleCatalog, EnrollmentError> {
        match &self.rules_path {
            Some(path) => RuleCatalog::from_file(path),
            None => Ok(RuleCatalog::builtin().clone()),
        }
    }
}
