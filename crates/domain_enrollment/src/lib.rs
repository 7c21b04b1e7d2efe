//! Medicare Supplement Enrollment Domain
//!
//! This crate decides, for an insured person in a U.S. state, whether a date
//! falls inside that state's guaranteed-issue re-enrollment window, and when
//! an automated outreach scheduled inside such a window may be sent instead.
//!
//! # Architecture
//!
//! Two components, evaluated in order, with no shared mutable state:
//! - **Rule Catalog**: immutable lookup of [`StateRule`]s by state code
//! - **Window Resolver**: projects the anchor date into the relevant year,
//!   computes the window, and defers send dates past it
//!
//! # Rule Types
//!
//! ```text
//! BirthdayRule              window around the insured's birthday
//! AnniversaryRule           window around the policy effective date
//! ContinuousOpenEnrollment  eligible on every date
//! NoSpecialRule             never eligible through a window
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_enrollment::api;
//!
//! let effective = NaiveDate::from_ymd_opt(2019, 9, 1).unwrap();
//! let scheduled = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
//!
//! if api::is_in_restricted_window("MO", effective, scheduled) {
//!     let send_on = api::compute_deferred_send_date("MO", effective, scheduled);
//!     assert_eq!(send_on, NaiveDate::from_ymd_opt(2024, 11, 4).unwrap());
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod rule;
pub mod source;
pub mod window;

pub use catalog::{RuleCatalog, RuleProvider};
pub use crate::config::EnrollmentConfig;
pub use error::EnrollmentError;
pub use rule::{RuleType, StateRule};
pub use source::RuleDocument;
pub use window::{window_bounds, SendDecision, WindowResolver, WindowStatus};
