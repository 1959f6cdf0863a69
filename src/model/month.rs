use serde::{Deserialize, Serialize};

use crate::model::date_key::DateKey;

/// The month currently displayed by the grid.
///
/// `month` is zero-based (0 = January). Construct through [`MonthCursor::new`]
/// so out-of-range months are carried into the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: i64) -> Self {
        Self::from_total(i128::from(year) * 12 + i128::from(month))
    }

    /// This cursor moved by `delta` months
    pub fn shifted(self, delta: i64) -> Self {
        Self::from_total(self.total() + i128::from(delta))
    }

    fn total(self) -> i128 {
        i128::from(self.year) * 12 + i128::from(self.month)
    }

    /// Months past the `i32` year range saturate at its first or last month.
    fn from_total(total: i128) -> Self {
        let year = total.div_euclid(12);
        match i32::try_from(year) {
            Ok(year) => MonthCursor {
                year,
                month: total.rem_euclid(12) as u32,
            },
            Err(_) if year < 0 => MonthCursor {
                year: i32::MIN,
                month: 0,
            },
            Err(_) => MonthCursor {
                year: i32::MAX,
                month: 11,
            },
        }
    }

    /// The month containing `date`
    pub fn containing(date: DateKey) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// 1-based month number, as written in a date key
    pub fn month1(self) -> u32 {
        self.month + 1
    }
}

/// English month names, indexed by zero-based month
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday header labels for a Sunday-first grid
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_month_overflow() {
        assert_eq!(MonthCursor::new(2024, 12), MonthCursor { year: 2025, month: 0 });
        assert_eq!(MonthCursor::new(2024, -1), MonthCursor { year: 2023, month: 11 });
        assert_eq!(MonthCursor::new(2024, -13), MonthCursor { year: 2022, month: 11 });
        assert_eq!(MonthCursor::new(2024, 5), MonthCursor { year: 2024, month: 5 });
    }

    #[test]
    fn test_new_saturates_outside_year_range() {
        assert_eq!(MonthCursor::new(i32::MAX, 12), MonthCursor { year: i32::MAX, month: 11 });
        assert_eq!(MonthCursor::new(i32::MIN, -1), MonthCursor { year: i32::MIN, month: 0 });
        assert_eq!(MonthCursor::new(0, i64::MAX), MonthCursor { year: i32::MAX, month: 11 });
        assert_eq!(MonthCursor::new(0, i64::MIN), MonthCursor { year: i32::MIN, month: 0 });
    }

    #[test]
    fn test_shifted_carries_unnormalized_month() {
        let cursor = MonthCursor { year: 2024, month: 14 };
        assert_eq!(cursor.shifted(0), MonthCursor { year: 2025, month: 2 });
        assert_eq!(cursor.shifted(-15), MonthCursor { year: 2023, month: 11 });
    }

    #[test]
    fn test_containing_uses_zero_based_month() {
        let date: DateKey = "2024-03-15".parse().unwrap();
        let cursor = MonthCursor::containing(date);
        assert_eq!(cursor, MonthCursor { year: 2024, month: 2 });
        assert_eq!(cursor.month1(), 3);
    }
}
