//! Window Resolver
//!
//! Calendar arithmetic for guaranteed-issue windows. Anchors (birth dates and
//! policy anniversaries) recur every year, so each calculation first moves
//! the anchor into the calendar year being asked about and then applies the
//! state's offsets.
//!
//! # Operations
//!
//! - [`window_bounds`]: inclusive start/end of a rule's window in a given year
//! - [`WindowResolver::is_in_restricted_window`]: membership of a query date
//! - [`WindowResolver::compute_deferred_send_date`]: first compliant send date
//!   after the window closes
//! - [`WindowResolver::resolve_send_date`]: membership check and deferral in
//!   one call
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_enrollment::WindowResolver;
//!
//! let resolver = WindowResolver::builtin();
//! let birth_date = NaiveDate::from_ymd_opt(1955, 3, 10).unwrap();
//! let send_on = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//!
//! assert!(resolver.is_in_restricted_window("KY", birth_date, send_on));
//! assert_eq!(
//!     resolver.compute_deferred_send_date("KY", birth_date, send_on),
//!     NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
//! );
//! ```
//!
//! # Known limitation
//!
//! Membership re-projects the anchor into the query date's year only. A
//! window that itself crosses December 31 (a late-December anchor, or an
//! early-January anchor with days before it) is only recognised on the side
//! of the boundary that shares the query's year.

use chrono::{Datelike, NaiveDate};
use core_kernel::temporal::{self, DateRange, TemporalError};
use serde::{Deserialize, Serialize};

use crate::catalog::{RuleCatalog, RuleProvider};
use crate::rule::{RuleType, StateRule};

/// Calendar months a send is pushed past the end of a restricted window
pub const DEFERRAL_MONTHS: u32 = 1;

/// Computes the inclusive window for `rule` with the anchor projected into
/// `reference_year`.
///
/// Nevada windows always open on the first day of the anchor's month,
/// whatever `days_before_anchor` says. Every other state opens
/// `days_before_anchor` days before the projected anchor. The window closes
/// `total_days` after it opens.
///
/// Returns `None` for rule types without a bounded window and when the
/// arithmetic leaves the representable calendar.
pub fn window_bounds(rule: &StateRule, anchor: NaiveDate, reference_year: i32) -> Option<DateRange> {
    match rule.rule_type {
        RuleType::BirthdayRule | RuleType::AnniversaryRule => {}
        RuleType::ContinuousOpenEnrollment | RuleType::NoSpecialRule => return None,
    }

    match bounded_window(rule, anchor, reference_year) {
        Ok(window) => Some(window),
        Err(error) => {
            tracing::warn!(
                state = %rule.state,
                %anchor,
                reference_year,
                %error,
                "Window bounds outside calendar range; treating as no window"
            );
            None
        }
    }
}

fn bounded_window(
    rule: &StateRule,
    anchor: NaiveDate,
    reference_year: i32,
) -> Result<DateRange, TemporalError> {
    let projected = temporal::project_into_year(anchor, reference_year)?;
    let start = if rule.state == "NV" {
        temporal::first_of_month(projected)
    } else {
        temporal::sub_days(projected, rule.days_before_anchor)?
    };
    DateRange::starting_at(start, rule.total_days)
}

/// First compliant date after `window` closes
fn defer_past(window: &DateRange) -> Result<NaiveDate, TemporalError> {
    temporal::add_months(window.end, DEFERRAL_MONTHS)
}

/// Classifies `query` against an already-resolved rule
fn evaluate_rule(rule: &StateRule, anchor: NaiveDate, query: NaiveDate) -> WindowStatus {
    let status = match rule.rule_type {
        RuleType::ContinuousOpenEnrollment => WindowStatus::AlwaysOpen,
        RuleType::NoSpecialRule => WindowStatus::NotApplicable,
        RuleType::BirthdayRule | RuleType::AnniversaryRule => {
            match window_bounds(rule, anchor, query.year()) {
                Some(window) if window.contains(query) => WindowStatus::Open(window),
                Some(window) => WindowStatus::Closed(window),
                None => WindowStatus::NotApplicable,
            }
        }
    };

    tracing::debug!(
        state = %rule.state,
        rule_type = %rule.rule_type,
        %anchor,
        %query,
        ?status,
        "Evaluated enrollment window"
    );
    status
}

/// Outcome of checking a date against a state's rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "window", rename_all = "snake_case")]
pub enum WindowStatus {
    /// The state has no rule in the catalog
    NoRule,
    /// Continuous open enrollment: eligible on every date
    AlwaysOpen,
    /// The rule has no window semantics for this input
    NotApplicable,
    /// The date falls inside the projected window
    Open(DateRange),
    /// The date falls outside the projected window
    Closed(DateRange),
}

impl WindowStatus {
    /// Returns true if the date is inside a guaranteed-issue period
    pub fn is_open(&self) -> bool {
        matches!(self, WindowStatus::AlwaysOpen | WindowStatus::Open(_))
    }

    /// The projected window, when the rule defines one
    pub fn window(&self) -> Option<DateRange> {
        match self {
            WindowStatus::Open(window) | WindowStatus::Closed(window) => Some(*window),
            WindowStatus::NoRule | WindowStatus::AlwaysOpen | WindowStatus::NotApplicable => None,
        }
    }
}

/// When an outreach should actually go out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SendDecision {
    /// No restricted window applies; keep the original date
    SendAsScheduled { send_on: NaiveDate },
    /// The original date fell inside a restricted window
    Deferred {
        scheduled: NaiveDate,
        send_on: NaiveDate,
        window: DateRange,
    },
}

impl SendDecision {
    /// The date the outreach goes out
    pub fn send_on(&self) -> NaiveDate {
        match self {
            SendDecision::SendAsScheduled { send_on } | SendDecision::Deferred { send_on, .. } => {
                *send_on
            }
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, SendDecision::Deferred { .. })
    }
}

/// Applies state rules from a [`RuleProvider`] to anchor and query dates
///
/// Every method takes the dates it reasons about explicitly; nothing reads
/// the system clock.
#[derive(Debug, Clone)]
pub struct WindowResolver<P> {
    provider: P,
}

impl WindowResolver<&'static RuleCatalog> {
    /// Resolver over the compiled-in rule table
    pub fn builtin() -> Self {
        Self::new(RuleCatalog::builtin())
    }
}

impl<P: RuleProvider> WindowResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Rule for a raw state code; case-insensitive, `None` when absent
    pub fn lookup_rule(&self, state_code: &str) -> Option<&StateRule> {
        self.provider.lookup(state_code)
    }

    /// Classifies `query` against the state's rule for `anchor`
    pub fn evaluate(&self, state_code: &str, anchor: NaiveDate, query: NaiveDate) -> WindowStatus {
        match self.lookup_rule(state_code) {
            Some(rule) => evaluate_rule(rule, anchor, query),
            None => WindowStatus::NoRule,
        }
    }

    /// Returns true if `query` is inside the state's guaranteed-issue period
    ///
    /// Continuous open enrollment states are always inside; states without
    /// a rule, and states whose rule is `NoSpecialRule`, never are.
    pub fn is_in_restricted_window(&self, state_code: &str, anchor: NaiveDate, query: NaiveDate) -> bool {
        self.evaluate(state_code, anchor, query).is_open()
    }

    /// The window projected into the year of `date`, if the state has one
    pub fn window_for_date(&self, state_code: &str, anchor: NaiveDate, date: NaiveDate) -> Option<DateRange> {
        let rule = self.lookup_rule(state_code)?;
        window_bounds(rule, anchor, date.year())
    }

    pub fn has_continuous_open_enrollment(&self, state_code: &str) -> bool {
        self.lookup_rule(state_code)
            .is_some_and(|rule| rule.rule_type == RuleType::ContinuousOpenEnrollment)
    }

    pub fn allows_plan_switch_only(&self, state_code: &str) -> bool {
        self.lookup_rule(state_code)
            .is_some_and(|rule| rule.can_present_different_plan_only)
    }

    /// Date an outreach scheduled for `scheduled` must move to
    ///
    /// The window is projected into the year of `scheduled` and the result
    /// is one calendar month after the window closes.
    ///
    /// # Precondition
    ///
    /// This does NOT check that `scheduled` is inside the window. Call
    /// [`is_in_restricted_window`](Self::is_in_restricted_window) first and
    /// only defer when it returned true, or use
    /// [`resolve_send_date`](Self::resolve_send_date) which does both.
    /// Calling it for a date outside the window pushes a valid send date
    /// forward for no reason.
    ///
    /// States without a rule, and rules without a bounded window, return
    /// `scheduled` unchanged.
    pub fn compute_deferred_send_date(
        &self,
        state_code: &str,
        anchor: NaiveDate,
        scheduled: NaiveDate,
    ) -> NaiveDate {
        let Some(rule) = self.lookup_rule(state_code) else {
            return scheduled;
        };

        let window = match rule.rule_type {
            RuleType::BirthdayRule | RuleType::AnniversaryRule => {
                window_bounds(rule, anchor, scheduled.year())
            }
            RuleType::ContinuousOpenEnrollment | RuleType::NoSpecialRule => None,
        };

        window
            .and_then(|window| self.deferral_for(rule, &window))
            .unwrap_or(scheduled)
    }

    /// Checks `scheduled` against the state's window and defers it when it
    /// falls inside
    pub fn resolve_send_date(
        &self,
        state_code: &str,
        anchor: NaiveDate,
        scheduled: NaiveDate,
    ) -> SendDecision {
        let Some(rule) = self.lookup_rule(state_code) else {
            return SendDecision::SendAsScheduled { send_on: scheduled };
        };

        let deferred = match evaluate_rule(rule, anchor, scheduled) {
            WindowStatus::Open(window) => self
                .deferral_for(rule, &window)
                .map(|send_on| (window, send_on)),
            WindowStatus::NoRule
            | WindowStatus::AlwaysOpen
            | WindowStatus::NotApplicable
            | WindowStatus::Closed(_) => None,
        };

        match deferred {
            Some((window, send_on)) => {
                tracing::debug!(
                    state = %rule.state,
                    %scheduled,
                    %send_on,
                    window_start = %window.start,
                    window_end = %window.end,
                    "Deferred send out of restricted window"
                );
                SendDecision::Deferred {
                    scheduled,
                    send_on,
                    window,
                }
            }
            None => SendDecision::SendAsScheduled { send_on: scheduled },
        }
    }

    fn deferral_for(&self, rule: &StateRule, window: &DateRange) -> Option<NaiveDate> {
        match defer_past(window) {
            Ok(date) => Some(date),
            Err(error) => {
                tracing::warn!(
                    state = %rule.state,
                    window_end = %window.end,
                    %error,
                    "Deferred date outside calendar range; keeping scheduled date"
                );
                None
            }
        }
    }
}

impl Default for WindowResolver<&'static RuleCatalog> {
    fn default() -> Self {
        Self::builtin()
    }
}
