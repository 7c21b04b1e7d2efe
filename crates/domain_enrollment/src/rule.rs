//! State guaranteed-issue rule definitions
//!
//! A [`StateRule`] describes the re-enrollment right a state grants to
//! Medicare supplement holders: what the window is anchored to, how many
//! days it opens before the anchor, and how long it stays open.

use core_kernel::StateCode;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EnrollmentError;

/// Kind of guaranteed-issue right a state grants
///
/// This set is closed. Every decision matches on it exhaustively so a new
/// kind of right has to be handled everywhere before the crate compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Window recurs annually around the insured's date of birth
    #[serde(alias = "BirthdayRule")]
    BirthdayRule,
    /// Window recurs annually around the policy effective date
    #[serde(alias = "AnniversaryRule")]
    AnniversaryRule,
    /// Guaranteed issue at any time, no bounded window
    #[serde(alias = "ContinuousOpenEnrollment")]
    ContinuousOpenEnrollment,
    /// No state-specific re-enrollment right
    #[serde(alias = "NoSpecialRule")]
    NoSpecialRule,
}

impl RuleType {
    /// Returns true if the right is limited to an annually recurring window
    pub fn has_bounded_window(&self) -> bool {
        match self {
            RuleType::BirthdayRule | RuleType::AnniversaryRule => true,
            RuleType::ContinuousOpenEnrollment | RuleType::NoSpecialRule => false,
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RuleType::BirthdayRule => "birthday rule",
            RuleType::AnniversaryRule => "anniversary rule",
            RuleType::ContinuousOpenEnrollment => "continuous open enrollment",
            RuleType::NoSpecialRule => "no special rule",
        };
        f.write_str(label)
    }
}

/// Re-enrollment rule for a single state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRule {
    /// Two-letter state code, unique within a catalog
    pub state: StateCode,
    /// Kind of right granted
    pub rule_type: RuleType,
    /// Days the window opens before the anchor date
    #[serde(default)]
    pub days_before_anchor: u32,
    /// Window length in days, measured from the window start
    #[serde(default)]
    pub total_days: u32,
    /// The right only covers moving to a different plan, not the open market
    #[serde(default)]
    pub can_present_different_plan_only: bool,
    /// Display text; never consulted by any decision
    #[serde(default)]
    pub notes: String,
}

impl StateRule {
    /// Creates a rule with no plan restriction and empty notes
    pub fn new(
        state: StateCode,
        rule_type: RuleType,
        days_before_anchor: u32,
        total_days: u32,
    ) -> Self {
        Self {
            state,
            rule_type,
            days_before_anchor,
            total_days,
            can_present_different_plan_only: false,
            notes: String::new(),
        }
    }

    /// Marks the right as limited to switching plans
    pub fn plan_switch_only(mut self) -> Self {
        self.can_present_different_plan_only = true;
        self
    }

    /// Attaches display notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns true if this rule restricts outreach to a bounded window
    pub fn has_bounded_window(&self) -> bool {
        self.rule_type.has_bounded_window()
    }

    /// Checks the rule is internally consistent
    ///
    /// Rules without a bounded window must not carry window offsets; a
    /// nonzero offset there almost always means the wrong `rule_type` was
    /// entered.
    pub fn validate(&self) -> Result<(), EnrollmentError> {
        match self.rule_type {
            RuleType::BirthdayRule | RuleType::AnniversaryRule => {
                if self.total_days == 0 {
                    return Err(EnrollmentError::invalid_rule(
                        self.state,
                        format!("{} requires a nonzero total_days", self.rule_type),
                    ));
                }
            }
            RuleType::ContinuousOpenEnrollment | RuleType::NoSpecialRule => {
                if self.days_before_anchor != 0 || self.total_days != 0 {
                    return Err(EnrollmentError::invalid_rule(
                        self.state,
                        format!("{} cannot define window days", self.rule_type),
                    ));
                }
            }
        }
        Ok(())
    }
}
