//! Pre-built Test Fixtures
//!
//! Provides ready-to-use dates and state groupings for window tests.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;

/// Builds a date from literal parts
///
/// # Panics
///
/// Panics if the parts do not form a valid calendar date
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
}

/// Fixture for anchor dates
pub struct AnchorFixtures;

impl AnchorFixtures {
    /// Birth date whose birthday opens the Kentucky window on Mar 10
    pub fn birth_date_march_10() -> NaiveDate {
        ymd(1955, 3, 10)
    }

    /// Mid-June birth date used for boundary checks
    pub fn birth_date_june_15() -> NaiveDate {
        ymd(1957, 6, 15)
    }

    /// Leap-day birth date
    pub fn birth_date_leap_day() -> NaiveDate {
        ymd(1956, 2, 29)
    }

    /// Late-December birth date whose window crosses into January
    pub fn birth_date_december_20() -> NaiveDate {
        ymd(1954, 12, 20)
    }

    /// Policy effective date for anniversary rule checks
    pub fn policy_effective_september_1() -> NaiveDate {
        ymd(2019, 9, 1)
    }
}

/// Fixture for state codes grouped by the built-in rule they carry
pub struct StateFixtures;

impl StateFixtures {
    pub fn birthday_rule_states() -> &'static [&'static str] {
        &["CA", "ID", "IL", "KY", "LA", "MD", "NV", "OK", "OR"]
    }

    pub fn anniversary_rule_states() -> &'static [&'static str] {
        &["MO"]
    }

    pub fn continuous_enrollment_states() -> &'static [&'static str] {
        &["CT", "MA", "NY", "WA"]
    }

    /// States with no special re-enrollment right
    pub fn states_without_rule() -> &'static [&'static str] {
        &["TX", "FL", "AZ", "GA", "PA", "OH"]
    }

    /// Inputs that are not state codes at all
    pub fn malformed_codes() -> &'static [&'static str] {
        &["", " ", "K", "KYY", "Kentucky", "1A", "K-", "ÉÉ"]
    }
}
