//! Library surface over the compiled-in rule table
//!
//! These are the entry points the schedule generator calls. Each one is a
//! thin wrapper around [`WindowResolver::builtin`]; callers that load their
//! own rule set should build a [`WindowResolver`] over it instead.

use chrono::NaiveDate;

use crate::rule::StateRule;
use crate::window::WindowResolver;

/// Rule for a state code, matched case-insensitively
pub fn lookup_rule(state_code: &str) -> Option<StateRule> {
    WindowResolver::builtin().lookup_rule(state_code).cloned()
}

/// Returns true if `query` falls in the state's guaranteed-issue window for
/// `anchor` (birth date or policy effective date, matching the state's rule)
pub fn is_in_restricted_window(state_code: &str, anchor: NaiveDate, query: NaiveDate) -> bool {
    WindowResolver::builtin().is_in_restricted_window(state_code, anchor, query)
}

pub fn has_continuous_open_enrollment(state_code: &str) -> bool {
    WindowResolver::builtin().has_continuous_open_enrollment(state_code)
}

pub fn allows_plan_switch_only(state_code: &str) -> bool {
    WindowResolver::builtin().allows_plan_switch_only(state_code)
}

/// Compliant date for an outreach scheduled on `scheduled`
///
/// Only meaningful when [`is_in_restricted_window`] returned true for the
/// same inputs; see [`WindowResolver::compute_deferred_send_date`].
pub fn compute_deferred_send_date(state_code: &str, anchor: NaiveDate, scheduled: NaiveDate) -> NaiveDate {
    WindowResolver::builtin().compute_deferred_send_date(state_code, anchor, scheduled)
}
