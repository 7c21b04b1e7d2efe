//! Enrollment Window Resolution Tests
//!
//! This module contains tests for window bounds, membership, and send-date
//! deferral against the built-in rule table and purpose-built catalogs.
//!
//! # Test Organization
//!
//! - `bounds_tests` - window_bounds arithmetic, including the Nevada case
//! - `membership_tests` - is_in_restricted_window per rule type
//! - `deferral_tests` - compute_deferred_send_date and resolve_send_date
//! - `year_boundary_tests` - leap days and windows crossing Dec 31
//! - `property_tests` - invariants over generated inputs

use chrono::Datelike;
use domain_enrollment::{api, window_bounds, RuleType, SendDecision, WindowResolver, WindowStatus};
use test_utils::{
    assert_in_window, assert_not_in_window, assert_window_eq, catalog_of, ymd, AnchorFixtures,
    StateFixtures, StateRuleBuilder,
};

// ============================================================================
// WINDOW BOUNDS TESTS
// ============================================================================

mod bounds_tests {
    use super::*;

    /// Kentucky opens on the birthday and runs 60 days
    #[test]
    fn test_kentucky_window() {
        let rule = api::lookup_rule("KY").expect("KY has a rule");
        let window = window_bounds(&rule, AnchorFixtures::birth_date_march_10(), 2024);

        assert_window_eq(window, ymd(2024, 3, 10), ymd(2024, 5, 9));
    }

    /// Missouri opens 30 days before the policy anniversary and runs 63 days
    #[test]
    fn test_missouri_anniversary_window() {
        let rule = api::lookup_rule("MO").expect("MO has a rule");
        assert_eq!(rule.rule_type, RuleType::AnniversaryRule);

        let window = window_bounds(&rule, AnchorFixtures::policy_effective_september_1(), 2024);

        assert_window_eq(window, ymd(2024, 8, 2), ymd(2024, 10, 4));
    }

    /// Nevada opens on the first of the birth month even when the rule
    /// carries days before the anchor
    #[test]
    fn test_nevada_starts_first_of_birth_month() {
        let builtin = api::lookup_rule("NV").expect("NV has a rule");
        let padded = StateRuleBuilder::new("NV").with_window(90, 60).build();

        for rule in [builtin, padded] {
            let window = window_bounds(&rule, AnchorFixtures::birth_date_june_15(), 2026)
                .expect("birthday rule has bounds");
            assert_eq!(window.start, ymd(2026, 6, 1), "days_before={}", rule.days_before_anchor);
            assert_eq!(window.end, ymd(2026, 7, 31));
        }
    }

    /// The anchor is projected into the reference year, not used as-is
    #[test]
    fn test_bounds_use_reference_year() {
        let rule = api::lookup_rule("IL").expect("IL has a rule");
        let window = window_bounds(&rule, ymd(1951, 10, 1), 2031);

        assert_window_eq(window, ymd(2031, 10, 1), ymd(2031, 11, 15));
    }

    /// Rule types without a bounded window have no bounds
    #[test]
    fn test_no_bounds_without_window_semantics() {
        let coe = api::lookup_rule("NY").expect("NY has a rule");
        let none = StateRuleBuilder::no_special_rule("ZZ").build();

        assert!(window_bounds(&coe, ymd(1950, 1, 1), 2024).is_none());
        assert!(window_bounds(&none, ymd(1950, 1, 1), 2024).is_none());
    }
}

// ============================================================================
// MEMBERSHIP TESTS
// ============================================================================

mod membership_tests {
    use super::*;

    /// Both window bounds are inclusive
    #[test]
    fn test_boundary_inclusivity() {
        let catalog = catalog_of([StateRuleBuilder::new("ZZ").with_window(30, 60)]);
        let resolver = WindowResolver::new(&catalog);
        let anchor = ymd(2024, 6, 15);

        assert_not_in_window(&resolver, "ZZ", anchor, ymd(2024, 5, 15));
        assert_in_window(&resolver, "ZZ", anchor, ymd(2024, 5, 16));
        assert_in_window(&resolver, "ZZ", anchor, ymd(2024, 7, 15));
        assert_not_in_window(&resolver, "ZZ", anchor, ymd(2024, 7, 16));
    }

    /// California carries the same 30/60 shape as the boundary example
    #[test]
    fn test_california_boundaries() {
        let resolver = WindowResolver::builtin();
        let anchor = AnchorFixtures::birth_date_june_15();

        assert_not_in_window(&resolver, "CA", anchor, ymd(2024, 5, 15));
        assert_in_window(&resolver, "CA", anchor, ymd(2024, 5, 16));
        assert_in_window(&resolver, "CA", anchor, ymd(2024, 7, 15));
        assert_not_in_window(&resolver, "CA", anchor, ymd(2024, 7, 16));
    }

    /// Kentucky scenario through the free-function surface
    #[test]
    fn test_kentucky_scenario() {
        let anchor = ymd(2024, 3, 10);

        assert!(api::is_in_restricted_window("KY", anchor, ymd(2024, 4, 1)));
        assert!(api::allows_plan_switch_only("KY"));
        assert!(!api::has_continuous_open_enrollment("KY"));
    }

    /// Unsupported states never have a window
    #[test]
    fn test_texas_has_no_rule() {
        assert!(api::lookup_rule("TX").is_none());
        assert!(!api::is_in_restricted_window("TX", ymd(1950, 1, 1), ymd(2024, 1, 1)));
        assert!(!api::allows_plan_switch_only("TX"));
        assert!(!api::has_continuous_open_enrollment("TX"));
    }

    /// Continuous open enrollment states are always inside
    #[test]
    fn test_continuous_enrollment_states_always_open() {
        let resolver = WindowResolver::builtin();
        for state in StateFixtures::continuous_enrollment_states() {
            assert!(api::has_continuous_open_enrollment(state));
            assert_eq!(
                resolver.evaluate(state, ymd(1950, 1, 1), ymd(1901, 7, 4)),
                WindowStatus::AlwaysOpen
            );
        }
    }

    /// An explicit NoSpecialRule entry is never inside
    #[test]
    fn test_no_special_rule_never_open() {
        let catalog = catalog_of([StateRuleBuilder::no_special_rule("ZZ")]);
        let resolver = WindowResolver::new(&catalog);

        assert_eq!(
            resolver.evaluate("ZZ", ymd(1950, 6, 1), ymd(2024, 6, 1)),
            WindowStatus::NotApplicable
        );
        assert_not_in_window(&resolver, "ZZ", ymd(1950, 6, 1), ymd(2024, 6, 1));
    }

    /// Evaluate reports the projected window either way
    #[test]
    fn test_evaluate_reports_window() {
        let resolver = WindowResolver::builtin();
        let anchor = AnchorFixtures::birth_date_march_10();

        let open = resolver.evaluate("ky", anchor, ymd(2025, 3, 10));
        let closed = resolver.evaluate("ky", anchor, ymd(2025, 8, 1));

        assert!(matches!(open, WindowStatus::Open(w) if w.start == ymd(2025, 3, 10)));
        assert!(matches!(closed, WindowStatus::Closed(w) if w.end == ymd(2025, 5, 9)));
        assert_eq!(resolver.evaluate("TX", anchor, ymd(2025, 3, 10)), WindowStatus::NoRule);
    }

    /// The rule's plan restriction is reported per state
    #[test]
    fn test_plan_switch_only_states() {
        assert!(api::allows_plan_switch_only("MO"));
        assert!(!api::allows_plan_switch_only("CA"));
        assert!(!api::allows_plan_switch_only("NY"));
    }
}

// ============================================================================
// DEFERRAL TESTS
// ============================================================================

mod deferral_tests {
    use super::*;

    /// Kentucky deferral lands one month after the window closes
    #[test]
    fn test_kentucky_deferral() {
        let deferred = api::compute_deferred_send_date(
            "KY",
            AnchorFixtures::birth_date_march_10(),
            ymd(2024, 4, 1),
        );

        assert_eq!(deferred, ymd(2024, 6, 9));
        assert!(!api::is_in_restricted_window("KY", AnchorFixtures::birth_date_march_10(), deferred));
    }

    /// Deferral adds a calendar month, clamped to the month end
    #[test]
    fn test_deferral_uses_month_arithmetic() {
        // Opens Jan 1, closes Jan 31.
        let catalog = catalog_of([StateRuleBuilder::new("ZZ").with_window(0, 30)]);
        let resolver = WindowResolver::new(&catalog);
        let anchor = ymd(1950, 1, 1);

        assert_eq!(resolver.compute_deferred_send_date("ZZ", anchor, ymd(2024, 1, 15)), ymd(2024, 2, 29));
        assert_eq!(resolver.compute_deferred_send_date("ZZ", anchor, ymd(2025, 1, 15)), ymd(2025, 2, 28));
    }

    /// Deferral is computed in the year of the scheduled date
    #[test]
    fn test_deferral_uses_scheduled_year() {
        let deferred = api::compute_deferred_send_date(
            "MO",
            AnchorFixtures::policy_effective_september_1(),
            ymd(2030, 9, 10),
        );

        // 2030-08-02 + 63 days = 2030-10-04
        assert_eq!(deferred, ymd(2030, 11, 4));
    }

    /// States without a bounded window keep the scheduled date
    #[test]
    fn test_no_deferral_without_window() {
        let scheduled = ymd(2024, 6, 20);
        for state in ["TX", "NY", "", "not a state"] {
            assert_eq!(api::compute_deferred_send_date(state, ymd(1950, 6, 15), scheduled), scheduled);
        }
    }

    /// resolve_send_date defers only dates inside the window
    #[test]
    fn test_resolve_send_date() {
        let resolver = WindowResolver::builtin();
        let anchor = AnchorFixtures::birth_date_march_10();

        let inside = resolver.resolve_send_date("KY", anchor, ymd(2024, 4, 1));
        let outside = resolver.resolve_send_date("KY", anchor, ymd(2024, 9, 1));

        match inside {
            SendDecision::Deferred { scheduled, send_on, window } => {
                assert_eq!(scheduled, ymd(2024, 4, 1));
                assert_eq!(send_on, ymd(2024, 6, 9));
                assert_eq!(window.end, ymd(2024, 5, 9));
            }
            other => panic!("Expected deferral, got {:?}", other),
        }
        assert_eq!(outside, SendDecision::SendAsScheduled { send_on: ymd(2024, 9, 1) });
        assert!(!outside.is_deferred());
    }

    /// Continuous open enrollment is an eligibility, not a restriction
    #[test]
    fn test_resolve_send_date_continuous_enrollment() {
        let decision = WindowResolver::builtin().resolve_send_date("CT", ymd(1950, 1, 1), ymd(2024, 3, 3));
        assert_eq!(decision.send_on(), ymd(2024, 3, 3));
        assert!(!decision.is_deferred());
    }
}

// ============================================================================
// YEAR BOUNDARY TESTS
// ============================================================================

mod year_boundary_tests {
    use super::*;

    /// Leap-day birthdays fall on Feb 28 in common years
    #[test]
    fn test_leap_day_anchor() {
        let rule = api::lookup_rule("KY").expect("KY has a rule");
        let anchor = AnchorFixtures::birth_date_leap_day();

        assert_window_eq(window_bounds(&rule, anchor, 2024), ymd(2024, 2, 29), ymd(2024, 4, 29));
        assert_window_eq(window_bounds(&rule, anchor, 2025), ymd(2025, 2, 28), ymd(2025, 4, 29));
    }

    /// Days before the anchor can pull the start into the previous year
    #[test]
    fn test_window_start_in_previous_year() {
        let rule = api::lookup_rule("CA").expect("CA has a rule");
        let window = window_bounds(&rule, ymd(1950, 1, 10), 2025).expect("bounded");

        assert_eq!(window.start, ymd(2024, 12, 11));
        assert!(window.spans_year_boundary());
        assert!(api::is_in_restricted_window("CA", ymd(1950, 1, 10), ymd(2025, 1, 5)));
    }

    /// Membership only projects into the query's own year: the January tail
    /// of a window that opened the previous December is not recognised
    #[test]
    fn test_cross_year_window_tail_not_recognised() {
        let anchor = AnchorFixtures::birth_date_december_20();
        let resolver = WindowResolver::builtin();

        let window = resolver
            .window_for_date("LA", anchor, ymd(2024, 12, 25))
            .expect("LA has a window");
        assert_eq!(window.end, ymd(2025, 2, 21));
        assert!(window.contains(ymd(2025, 1, 10)));

        assert!(!resolver.is_in_restricted_window("LA", anchor, ymd(2025, 1, 10)));
    }
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{
        birth_date_strategy, date_strategy, mid_year_anchor_strategy, operating_date_strategy,
        unknown_state_strategy, window_shape_strategy,
    };

    proptest! {
        #[test]
        fn continuous_enrollment_always_in_window(anchor in date_strategy(), query in date_strategy()) {
            for state in StateFixtures::continuous_enrollment_states() {
                prop_assert!(api::is_in_restricted_window(state, anchor, query));
            }
        }

        #[test]
        fn unknown_states_never_restricted(
            state in unknown_state_strategy(),
            anchor in date_strategy(),
            date in date_strategy(),
        ) {
            prop_assert!(!api::is_in_restricted_window(&state, anchor, date));
            prop_assert_eq!(api::compute_deferred_send_date(&state, anchor, date), date);
        }

        #[test]
        fn nevada_start_is_first_of_month(
            anchor in birth_date_strategy(),
            year in 1990i32..2100,
            days_before in 0u32..120,
        ) {
            let rule = StateRuleBuilder::new("NV").with_window(days_before, 60).build();
            let window = window_bounds(&rule, anchor, year).expect("bounded");
            prop_assert_eq!(window.start, ymd(year, anchor.month(), 1));
        }

        #[test]
        fn deferred_date_is_outside_window(
            anchor in date_strategy(),
            scheduled in operating_date_strategy(),
        ) {
            for state in StateFixtures::birthday_rule_states()
                .iter()
                .chain(StateFixtures::anniversary_rule_states())
            {
                if api::is_in_restricted_window(state, anchor, scheduled) {
                    let deferred = api::compute_deferred_send_date(state, anchor, scheduled);
                    prop_assert!(deferred > scheduled);
                    prop_assert!(!api::is_in_restricted_window(state, anchor, deferred));
                }
            }
        }

        #[test]
        fn resolve_send_date_agrees_with_two_step_calls(
            anchor in date_strategy(),
            scheduled in operating_date_strategy(),
        ) {
            let resolver = WindowResolver::builtin();
            let states = StateFixtures::birthday_rule_states()
                .iter()
                .chain(StateFixtures::anniversary_rule_states())
                .chain(StateFixtures::continuous_enrollment_states())
                .chain(StateFixtures::states_without_rule());

            for state in states {
                let decision = resolver.resolve_send_date(state, anchor, scheduled);
                let restricted = resolver.is_in_restricted_window(state, anchor, scheduled)
                    && !api::has_continuous_open_enrollment(state);

                prop_assert_eq!(decision.is_deferred(), restricted, "state {}", state);
                if restricted {
                    prop_assert_eq!(
                        decision.send_on(),
                        resolver.compute_deferred_send_date(state, anchor, scheduled)
                    );
                } else {
                    prop_assert_eq!(decision.send_on(), scheduled);
                }
            }
        }

        #[test]
        fn window_length_matches_total_days(
            (before, total) in window_shape_strategy(),
            anchor in mid_year_anchor_strategy(),
            year in 2000i32..2050,
        ) {
            prop_assume!(total >= before);
            let rule = StateRuleBuilder::new("ZZ").with_window(before, total).build();
            let window = window_bounds(&rule, anchor, year).expect("bounded");
            prop_assert_eq!(window.days(), i64::from(total));
            prop_assert!(window.contains(ymd(year, anchor.month(), anchor.day())));
        }
    }
}
