//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use domain_enrollment::RuleCatalog;
use proptest::prelude::*;

use crate::fixtures::ymd;

/// Strategy for any calendar date between 1900-01-01 and 2199-12-31
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..109_572u64).prop_map(|offset| ymd(1900, 1, 1) + Days::new(offset))
}

/// Strategy for plausible Medicare-age birth dates (1920 through 1960)
pub fn birth_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..14_975u64).prop_map(|offset| ymd(1920, 1, 1) + Days::new(offset))
}

/// Strategy for query/scheduled dates in the operating range (2020 through 2035)
pub fn operating_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..5_844u64).prop_map(|offset| ymd(2020, 1, 1) + Days::new(offset))
}

/// Strategy for anchors whose window stays inside one calendar year
///
/// Limits the anchor to Mar 1 through Sep 30 so that even the longest
/// built-in window (30 days before, 93 total) never crosses Dec 31.
pub fn mid_year_anchor_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..214u64).prop_map(|offset| ymd(1950, 3, 1) + Days::new(offset))
}

/// Strategy for two-letter codes the built-in catalog has no rule for
pub fn unknown_state_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2}".prop_filter("code must not be in the built-in catalog", |code| {
        RuleCatalog::builtin().lookup(code).is_none()
    })
}

/// Strategy for (days_before_anchor, total_days) pairs within the range the
/// built-in states use
pub fn window_shape_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=45u32, 1u32..=93u32)
}

/// Strategy for any built-in state code in random casing
pub fn builtin_state_any_case_strategy() -> impl Strategy<Value = String> {
    let codes: Vec<String> = RuleCatalog::builtin()
        .iter()
        .map(|rule| rule.state.to_string())
        .collect();
    (proptest::sample::select(codes), any::<bool>(), any::<bool>()).prop_map(|(code, a, b)| {
        code.chars()
            .zip([a, b])
            .map(|(c, lower)| if lower { c.to_ascii_lowercase() } else { c })
            .collect()
    })
}
