//! Rule documents maintained outside the binary
//!
//! Compliance teams can ship an updated rule set without a rebuild by
//! pointing the service at a rules file. The document shape is the same in
//! every format:
//!
//! ```json
//! {
//!   "rules": [
//!     {
//!       "state": "KY",
//!       "rule_type": "birthday_rule",
//!       "days_before_anchor": 0,
//!       "total_days": 60,
//!       "can_present_different_plan_only": true,
//!       "notes": "60 days starting on the birthday"
//!     }
//!   ]
//! }
//! ```
//!
//! Files are read through the `config` crate, so JSON, TOML and YAML are
//! all accepted and the format is picked from the file extension.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::RuleCatalog;
use crate::error::EnrollmentError;
use crate::rule::StateRule;

/// Serialized form of a rule set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub rules: Vec<StateRule>,
}

impl RuleDocument {
    /// Validates the rules and builds a catalog
    pub fn into_catalog(self) -> Result<RuleCatalog, EnrollmentError> {
        RuleCatalog::from_rules(self.rules)
    }
}

impl From<&RuleCatalog> for RuleDocument {
    fn from(catalog: &RuleCatalog) -> Self {
        Self {
            rules: catalog.iter().cloned().collect(),
        }
    }
}

impl RuleCatalog {
    /// Loads a catalog from a JSON rule document
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentError::Parse`] for malformed JSON (including
    /// malformed state codes or unknown rule types), and the validation
    /// errors of [`RuleCatalog::from_rules`].
    pub fn from_json_str(json: &str) -> Result<Self, EnrollmentError> {
        let document: RuleDocument =
            serde_json::from_str(json).map_err(|e| EnrollmentError::Parse(e.to_string()))?;
        let catalog = document.into_catalog()?;

        tracing::info!(rules = catalog.len(), source = "json", "Rule catalog loaded");
        Ok(catalog)
    }

    /// Loads a catalog from a rules file (JSON, TOML or YAML)
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentError::Config`] if the file is missing or cannot
    /// be deserialized, and the validation errors of
    /// [`RuleCatalog::from_rules`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EnrollmentError> {
        let path = path.as_ref();
        let document: RuleDocument = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        let catalog = document.into_catalog()?;

        tracing::info!(
            rules = catalog.len(),
            path = %path.display(),
            "Rule catalog loaded from file"
        );
        Ok(catalog)
    }

    /// Serializes the catalog as a pretty-printed JSON rule document
    pub fn to_json_string(&self) -> Result<String, EnrollmentError> {
        serde_json::to_string_pretty(&RuleDocument::from(self))
            .map_err(|e| EnrollmentError::Parse(e.to_string()))
    }
}
