//! Test Data Builders
//!
//! Provides builder patterns for constructing rules with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::StateCode;
use domain_enrollment::{RuleCatalog, RuleType, StateRule};

/// Builder for constructing test state rules
pub struct StateRuleBuilder {
    state: String,
    rule_type: RuleType,
    days_before_anchor: u32,
    total_days: u32,
    plan_switch_only: bool,
    notes: String,
}

impl Default for StateRuleBuilder {
    fn default() -> Self {
        Self::new("ZZ")
    }
}

impl StateRuleBuilder {
    /// Creates a birthday rule opening on the anchor and lasting 30 days
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            rule_type: RuleType::BirthdayRule,
            days_before_anchor: 0,
            total_days: 30,
            plan_switch_only: false,
            notes: String::new(),
        }
    }

    /// Continuous open enrollment rule
    pub fn continuous(state: impl Into<String>) -> Self {
        Self::new(state)
            .with_rule_type(RuleType::ContinuousOpenEnrollment)
            .with_window(0, 0)
    }

    /// Explicit "no special rule" entry
    pub fn no_special_rule(state: impl Into<String>) -> Self {
        Self::new(state)
            .with_rule_type(RuleType::NoSpecialRule)
            .with_window(0, 0)
    }

    pub fn with_rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    /// Sets days before the anchor and total window length
    pub fn with_window(mut self, days_before_anchor: u32, total_days: u32) -> Self {
        self.days_before_anchor = days_before_anchor;
        self.total_days = total_days;
        self
    }

    pub fn plan_switch_only(mut self) -> Self {
        self.plan_switch_only = true;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builds the rule
    ///
    /// # Panics
    ///
    /// Panics if the state code is malformed
    pub fn build(self) -> StateRule {
        let state = StateCode::new(&self.state)
            .unwrap_or_else(|e| panic!("invalid test state code: {}", e));
        let rule = StateRule::new(state, self.rule_type, self.days_before_anchor, self.total_days)
            .with_notes(self.notes);
        if self.plan_switch_only {
            rule.plan_switch_only()
        } else {
            rule
        }
    }
}

/// Builds a validated catalog from rule builders
///
/// # Panics
///
/// Panics if the rules do not form a valid catalog
pub fn catalog_of(rules: impl IntoIterator<Item = StateRuleBuilder>) -> RuleCatalog {
    RuleCatalog::from_rules(rules.into_iter().map(StateRuleBuilder::build))
        .unwrap_or_else(|e| panic!("invalid test catalog: {}", e))
}
