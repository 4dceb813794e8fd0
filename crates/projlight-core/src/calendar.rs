//! Working-day calendar
//!
//! Plain Gregorian weekday arithmetic: a working day is any date whose weekday
//! belongs to the calendar's working week (Monday to Friday by default). No
//! holiday calendar is applied.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use projlight_core::next_working_days;
//!
//! // Friday 2024-06-14 -> the following Monday..Friday
//! let friday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
//! let days = next_working_days(friday, 5);
//! assert_eq!(days.first(), NaiveDate::from_ymd_opt(2024, 6, 17).as_ref());
//! assert_eq!(days.last(), NaiveDate::from_ymd_opt(2024, 6, 21).as_ref());
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of working days in the due-soon window
pub const DEFAULT_LOOKAHEAD: usize = 5;

/// Working week definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Weekdays counted as working days
    pub working_days: Vec<Weekday>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }
}

impl Calendar {
    /// Check if a date is a working day
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_days.contains(&date.weekday())
    }

    /// The next `count` working days strictly after `reference`, in order.
    ///
    /// Non-working days are skipped and do not count. A calendar with no
    /// working days yields an empty sequence; so does running off the end of
    /// the representable date range.
    pub fn next_working_days(&self, reference: NaiveDate, count: usize) -> Vec<NaiveDate> {
        if self.working_days.is_empty() {
            return Vec::new();
        }
        reference
            .iter_days()
            .skip(1)
            .filter(|d| self.is_working_day(*d))
            .take(count)
            .collect()
    }
}

/// The next `count` Monday-to-Friday dates after `reference`
pub fn next_working_days(reference: NaiveDate, count: usize) -> Vec<NaiveDate> {
    Calendar::default().next_working_days(reference, count)
}
