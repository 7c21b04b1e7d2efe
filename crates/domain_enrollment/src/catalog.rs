//! Rule Catalog
//!
//! Lookup of the guaranteed-issue rule that applies in a state. The catalog
//! is an immutable map keyed by normalized [`StateCode`]; a state missing
//! from the map has no special re-enrollment right.
//!
//! # Sources
//!
//! - [`RuleCatalog::builtin`]: the compiled-in rule table, materialised once
//!   per process and shared by every caller
//! - [`RuleCatalog::from_file`] / [`RuleCatalog::from_json_str`]: a rule set
//!   maintained outside the binary (see [`crate::source`])
//!
//! Both are reachable through the [`RuleProvider`] trait, which is what the
//! window resolver depends on.

use core_kernel::StateCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::EnrollmentError;
use crate::rule::{RuleType, StateRule};

/// Source of state rules consumed by the window resolver
pub trait RuleProvider: Send + Sync {
    /// Returns the rule for an already-normalized state code
    fn rule_for(&self, state: StateCode) -> Option<&StateRule>;

    /// Returns the rule for a raw, caller-supplied state code
    ///
    /// Input is trimmed and uppercased first. Malformed codes simply have
    /// no rule.
    fn lookup(&self, state_code: &str) -> Option<&StateRule> {
        StateCode::new(state_code)
            .ok()
            .and_then(|code| self.rule_for(code))
    }
}

impl<P: RuleProvider + ?Sized> RuleProvider for &P {
    fn rule_for(&self, state: StateCode) -> Option<&StateRule> {
        (**self).rule_for(state)
    }
}

impl<P: RuleProvider + ?Sized> RuleProvider for Arc<P> {
    fn rule_for(&self, state: StateCode) -> Option<&StateRule> {
        (**self).rule_for(state)
    }
}

/// Row of the compiled-in rule table
struct BuiltinRule {
    state: &'static [u8; 2],
    rule_type: RuleType,
    days_before_anchor: u32,
    total_days: u32,
    plan_switch_only: bool,
    notes: &'static str,
}

impl BuiltinRule {
    fn to_rule(&self) -> Option<StateRule> {
        let state = StateCode::from_ascii(self.state)?;
        let rule = StateRule::new(state, self.rule_type, self.days_before_anchor, self.total_days)
            .with_notes(self.notes);
        Some(if self.plan_switch_only { rule.plan_switch_only() } else { rule })
    }
}

const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        state: b"CA",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 30,
        total_days: 60,
        plan_switch_only: false,
        notes: "Window opens 30 days before the birthday and runs 60 days",
    },
    BuiltinRule {
        state: b"ID",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 63,
        plan_switch_only: false,
        notes: "63 days starting on the birthday",
    },
    BuiltinRule {
        state: b"IL",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 45,
        plan_switch_only: false,
        notes: "45 days starting on the birthday",
    },
    BuiltinRule {
        state: b"KY",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 60,
        plan_switch_only: true,
        notes: "60 days starting on the birthday; may only move to a different plan",
    },
    BuiltinRule {
        state: b"LA",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 30,
        total_days: 93,
        plan_switch_only: false,
        notes: "Opens 30 days before the birthday and closes 63 days after it",
    },
    BuiltinRule {
        state: b"MD",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 31,
        plan_switch_only: false,
        notes: "31 days starting on the birthday",
    },
    BuiltinRule {
        state: b"NV",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 60,
        plan_switch_only: false,
        notes: "60 days starting on the first day of the birth month",
    },
    BuiltinRule {
        state: b"OK",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 60,
        plan_switch_only: false,
        notes: "60 days starting on the birthday",
    },
    BuiltinRule {
        state: b"OR",
        rule_type: RuleType::BirthdayRule,
        days_before_anchor: 0,
        total_days: 31,
        plan_switch_only: false,
        notes: "31 days starting on the birthday",
    },
    BuiltinRule {
        state: b"MO",
        rule_type: RuleType::AnniversaryRule,
        days_before_anchor: 30,
        total_days: 63,
        plan_switch_only: true,
        notes: "Opens 30 days before the policy anniversary and runs 63 days; same plan with another carrier",
    },
    BuiltinRule {
        state: b"CT",
        rule_type: RuleType::ContinuousOpenEnrollment,
        days_before_anchor: 0,
        total_days: 0,
        plan_switch_only: false,
        notes: "Guaranteed issue year-round",
    },
    BuiltinRule {
        state: b"MA",
        rule_type: RuleType::ContinuousOpenEnrollment,
        days_before_anchor: 0,
        total_days: 0,
        plan_switch_only: false,
        notes: "Guaranteed issue year-round",
    },
    BuiltinRule {
        state: b"NY",
        rule_type: RuleType::ContinuousOpenEnrollment,
        days_before_anchor: 0,
        total_days: 0,
        plan_switch_only: false,
        notes: "Guaranteed issue year-round",
    },
    BuiltinRule {
        state: b"WA",
        rule_type: RuleType::ContinuousOpenEnrollment,
        days_before_anchor: 0,
        total_days: 0,
        plan_switch_only: false,
        notes: "May change plans year-round",
    },
];

static BUILTIN_CATALOG: Lazy<RuleCatalog> = Lazy::new(|| {
    let rules: HashMap<StateCode, StateRule> = BUILTIN_RULES
        .iter()
        .filter_map(BuiltinRule::to_rule)
        .map(|rule| (rule.state, rule))
        .collect();
    tracing::info!(rules = rules.len(), source = "builtin", "Rule catalog initialised");
    RuleCatalog { rules }
});

/// Immutable set of state rules keyed by state code
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: HashMap<StateCode, StateRule>,
}

impl RuleCatalog {
    /// Returns the compiled-in catalog
    pub fn builtin() -> &'static RuleCatalog {
        &BUILTIN_CATALOG
    }

    /// Builds a catalog from a list of rules
    ///
    /// # Errors
    ///
    /// - [`EnrollmentError::DuplicateState`] if a state appears twice
    /// - [`EnrollmentError::InvalidRule`] if any rule fails validation
    pub fn from_rules(rules: impl IntoIterator<Item = StateRule>) -> Result<Self, EnrollmentError> {
        let mut map = HashMap::new();
        for rule in rules {
            rule.validate()?;
            if map.contains_key(&rule.state) {
                return Err(EnrollmentError::duplicate_state(rule.state));
            }
            map.insert(rule.state, rule);
        }
        Ok(Self { rules: map })
    }

    /// Returns the rule for a raw state code, if the state has one
    pub fn lookup(&self, state_code: &str) -> Option<&StateRule> {
        RuleProvider::lookup(self, state_code)
    }

    /// Number of states with a rule
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules ordered by state code
    pub fn iter(&self) -> impl Iterator<Item = &StateRule> {
        let mut rules: Vec<&StateRule> = self.rules.values().collect();
        rules.sort_by_key(|rule| rule.state);
        rules.into_iter()
    }

    /// States whose rule is of the given type, ordered by state code
    pub fn states_with(&self, rule_type: RuleType) -> Vec<StateCode> {
        self.iter()
            .filter(|rule| rule.rule_type == rule_type)
            .map(|rule| rule.state)
            .collect()
    }
}

impl RuleProvider for RuleCatalog {
    fn rule_for(&self, state: StateCode) -> Option<&StateRule> {
        self.rules.get(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_no_dropped_rows() {
        assert_eq!(RuleCatalog::builtin().len(), BUILTIN_RULES.len());
    }

    #[test]
    fn test_builtin_rules_validate() {
        for rule in RuleCatalog::builtin().iter() {
            assert!(rule.validate().is_ok(), "{} should validate", rule.state);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.lookup("ky"), catalog.lookup("KY"));
        assert_eq!(catalog.lookup(" Ky ").map(|r| r.rule_type), Some(RuleType::BirthdayRule));
    }

    #[test]
    fn test_lookup_malformed_code_is_none() {
        let catalog = RuleCatalog::builtin();
        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup("Kentucky").is_none());
        assert!(catalog.lookup("K1").is_none());
    }

    #[test]
    fn test_from_rules_rejects_duplicates() {
        let ky = StateCode::new("KY").unwrap();
        let result = RuleCatalog::from_rules(vec![
            StateRule::new(ky, RuleType::BirthdayRule, 0, 60),
            StateRule::new(ky, RuleType::BirthdayRule, 0, 30),
        ]);
        assert!(matches!(result, Err(EnrollmentError::DuplicateState(s)) if s == "KY"));
    }
}
