//! Calendar date handling types
//!
//! This module provides the date arithmetic used by enrollment window
//! calculations:
//! - Re-projecting an annually recurring date (birthday, policy anniversary)
//!   into another calendar year
//! - Day-based and month-based offsets that never panic on overflow
//! - Inclusive date ranges for window membership
//!
//! All values are calendar dates without a time or timezone component.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Date out of range: {operation} on {date}")]
    OutOfRange {
        date: NaiveDate,
        operation: String,
    },
}

impl TemporalError {
    fn out_of_range(date: NaiveDate, operation: impl Into<String>) -> Self {
        TemporalError::OutOfRange {
            date,
            operation: operation.into(),
        }
    }
}

/// Moves a date into `year`, keeping its month and day.
///
/// February 29 projected into a non-leap year lands on February 28, so a
/// leap-day birthday still has an anniversary every year.
pub fn project_into_year(date: NaiveDate, year: i32) -> Result<NaiveDate, TemporalError> {
    date.with_year(year)
        .or_else(|| {
            if date.month() == 2 && date.day() == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
        .ok_or_else(|| TemporalError::out_of_range(date, format!("project into year {}", year)))
}

/// Adds a number of calendar days
pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| TemporalError::out_of_range(date, format!("add {} days", days)))
}

/// Subtracts a number of calendar days
pub fn sub_days(date: NaiveDate, days: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| TemporalError::out_of_range(date, format!("subtract {} days", days)))
}

/// Adds calendar months, clamping the day to the end of the target month.
///
/// Jan 31 plus one month is Feb 29 in a leap year and Feb 28 otherwise,
/// never a date in March.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| TemporalError::out_of_range(date, format!("add {} months", months)))
}

/// Returns the first day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds the range starting at `start` and ending `length_days` later
    pub fn starting_at(start: NaiveDate, length_days: u32) -> Result<Self, TemporalError> {
        let end = add_days(start, length_days)?;
        Ok(Self { start, end })
    }

    /// Returns true if `date` lies within the range, both bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days from start to end
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true if the range crosses a December 31 / January 1 boundary
    pub fn spans_year_boundary(&self) -> bool {
        self.start.year() != self.end.year()
    }
}
