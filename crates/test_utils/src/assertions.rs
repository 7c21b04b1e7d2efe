//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for window decisions that give
//! more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use core_kernel::DateRange;
use domain_enrollment::{RuleProvider, WindowResolver};

/// Asserts that `query` is inside the state's window
pub fn assert_in_window<P: RuleProvider>(
    resolver: &WindowResolver<P>,
    state: &str,
    anchor: NaiveDate,
    query: NaiveDate,
) {
    assert!(
        resolver.is_in_restricted_window(state, anchor, query),
        "Expected {} to be inside the {} window for anchor {}, status was {:?}",
        query,
        state,
        anchor,
        resolver.evaluate(state, anchor, query)
    );
}

/// Asserts that `query` is outside the state's window
pub fn assert_not_in_window<P: RuleProvider>(
    resolver: &WindowResolver<P>,
    state: &str,
    anchor: NaiveDate,
    query: NaiveDate,
) {
    assert!(
        !resolver.is_in_restricted_window(state, anchor, query),
        "Expected {} to be outside the {} window for anchor {}, status was {:?}",
        query,
        state,
        anchor,
        resolver.evaluate(state, anchor, query)
    );
}

/// Asserts that a window has the expected inclusive bounds
pub fn assert_window_eq(actual: Option<DateRange>, start: NaiveDate, end: NaiveDate) {
    match actual {
        Some(window) => {
            assert_eq!(window.start, start, "Window start mismatch (end was {})", window.end);
            assert_eq!(window.end, end, "Window end mismatch (start was {})", window.start);
        }
        None => panic!("Expected window [{}, {}], got no window", start, end),
    }
}
