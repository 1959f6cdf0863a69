use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::date_key::DateKey;
use crate::model::month::{MONTH_NAMES, MonthCursor};

/// Cells in a month grid: six weeks of seven days
pub const GRID_CELLS: usize = 42;
pub const GRID_COLUMNS: usize = 7;

/// One slot of the month grid.
///
/// `day` is the offset from the 1st plus one, so leading fillers carry zero or
/// negative values and trailing fillers run past the month length. Only cells
/// that belong to the displayed month carry a `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: i32,
    pub date: Option<DateKey>,
}

/// Day of week of the 1st of the month, 0 = Sunday
pub fn first_weekday(cursor: MonthCursor) -> Option<u32> {
    NaiveDate::from_ymd_opt(cursor.year, cursor.month1(), 1)
        .map(|d| d.weekday().num_days_from_sunday())
}

/// Number of days in the month
pub fn days_in_month(cursor: MonthCursor) -> u32 {
    match cursor.month1() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(cursor.year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Canonical key for a day of a (year, zero-based month)
pub fn format_date_key(year: i32, month: u32, day: u32) -> Option<DateKey> {
    DateKey::from_ymd(year, month + 1, day).ok()
}

/// Build the Sunday-first month grid for `(year, month)`, month zero-based.
///
/// Months outside 0..=11 are carried into the year. Always returns
/// [`GRID_CELLS`] cells; for years a date key cannot express, every cell is a
/// filler.
pub fn generate(year: i32, month: i64) -> Vec<CalendarCell> {
    generate_for(MonthCursor::new(year, month))
}

pub fn generate_for(cursor: MonthCursor) -> Vec<CalendarCell> {
    let cursor = cursor.shifted(0);
    let first = first_weekday(cursor).unwrap_or(0) as i32;
    let days = days_in_month(cursor) as i32;

    (0..GRID_CELLS as i32)
        .map(|i| {
            let day = i - first + 1;
            let date = if (1..=days).contains(&day) {
                format_date_key(cursor.year, cursor.month, day as u32)
            } else {
                None
            };
            CalendarCell { day, date }
        })
        .collect()
}

/// Move `(year, month)` by `delta` months, month zero-based.
///
/// Results beyond the `i32` year range stop at January of `i32::MIN` or
/// December of `i32::MAX`.
pub fn change_month(year: i32, month: u32, delta: i64) -> (i32, u32) {
    let cursor = MonthCursor { year, month }.shifted(delta);
    (cursor.year, cursor.month)
}

/// Header title such as "March 2024"
pub fn month_title(cursor: MonthCursor) -> String {
    format!("{} {}", MONTH_NAMES[cursor.month as usize % 12], cursor.year)
}

/// Position of `date` in the grid of `cursor`, if it is shown there
pub fn cell_index_of(cursor: MonthCursor, date: DateKey) -> Option<usize> {
    if MonthCursor::containing(date) != cursor {
        return None;
    }
    let first = first_weekday(cursor)?;
    Some((first + date.day() - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dated(cells: &[CalendarCell]) -> usize {
        cells.iter().filter(|c| c.date.is_some()).count()
    }

    #[test]
    fn test_march_2024_layout() {
        // 2024-03-01 is a Friday
        let cells = generate(2024, 2);
        assert_eq!(cells.len(), 42);
        for cell in &cells[0..5] {
            assert!(cell.date.is_none());
        }
        assert_eq!(cells[0].day, -4);
        assert_eq!(cells[5].date.unwrap().to_string(), "2024-03-01");
        assert_eq!(cells[5].day, 1);
        assert_eq!(cells[35].date.unwrap().to_string(), "2024-03-31");
        for cell in &cells[36..42] {
            assert!(cell.date.is_none());
        }
        assert_eq!(cells[41].day, 37);
    }

    #[test]
    fn test_every_month_has_42_cells_and_matching_date_count() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let cells = generate(year, month);
                let cursor = MonthCursor::new(year, month);
                assert_eq!(cells.len(), GRID_CELLS);
                assert_eq!(dated(&cells), days_in_month(cursor) as usize);
            }
        }
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_fillers() {
        // 2023-10-01 is a Sunday
        let cells = generate(2023, 9);
        assert_eq!(cells[0].date.unwrap().to_string(), "2023-10-01");
    }

    #[test]
    fn test_february_lengths() {
        assert_eq!(days_in_month(MonthCursor::new(2024, 1)), 29);
        assert_eq!(days_in_month(MonthCursor::new(2023, 1)), 28);
        assert_eq!(days_in_month(MonthCursor::new(1900, 1)), 28);
        assert_eq!(days_in_month(MonthCursor::new(2000, 1)), 29);
    }

    #[test]
    fn test_generate_normalizes_month() {
        assert_eq!(generate(2023, 14), generate(2024, 2));
        assert_eq!(generate(2024, -1), generate(2023, 11));
    }

    #[test]
    fn test_years_without_date_keys_are_all_filler() {
        let cells = generate(12_000, 0);
        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(dated(&cells), 0);
    }

    #[test]
    fn test_change_month_wraps_year() {
        assert_eq!(change_month(2024, 0, -1), (2023, 11));
        assert_eq!(change_month(2024, 11, 1), (2025, 0));
        assert_eq!(change_month(2024, 5, 1), (2024, 6));
        assert_eq!(change_month(2024, 5, -1), (2024, 4));
    }

    #[test]
    fn test_change_month_multi_step() {
        assert_eq!(change_month(2024, 0, -13), (2022, 11));
        assert_eq!(change_month(2024, 11, 25), (2027, 0));
        assert_eq!(change_month(2024, 3, 24), (2026, 3));
        assert_eq!(change_month(2024, 3, 0), (2024, 3));
    }

    #[test]
    fn test_change_month_extreme_deltas() {
        assert_eq!(change_month(2024, 5, i64::MAX), (i32::MAX, 11));
        assert_eq!(change_month(2024, 5, i64::MIN), (i32::MIN, 0));
        assert_eq!(change_month(2024, 0, 12 * i64::from(i32::MAX)), (i32::MAX, 11));
        assert_eq!(change_month(2024, 0, -12 * i64::from(i32::MAX)), (2024 - i32::MAX, 0));
        assert_eq!(change_month(-2024, 0, -12 * i64::from(i32::MAX)), (i32::MIN, 0));
        assert_eq!(change_month(i32::MAX, 10, 1), (i32::MAX, 11));
        assert_eq!(change_month(i32::MAX, 11, -1), (i32::MAX, 10));
    }

    #[test]
    fn test_generate_for_normalizes_cursor() {
        let cells = generate_for(MonthCursor { year: 2024, month: 14 });
        assert_eq!(cells, generate(2025, 2));
        assert_eq!(dated(&cells), 31);
    }

    #[test]
    fn test_format_date_key_pads() {
        assert_eq!(format_date_key(2024, 0, 5).unwrap().to_string(), "2024-01-05");
        assert!(format_date_key(2024, 1, 30).is_none());
    }

    #[test]
    fn test_titles_and_cell_lookup() {
        let cursor = MonthCursor::new(2024, 2);
        assert_eq!(month_title(cursor), "March 2024");
        let first: DateKey = "2024-03-01".parse().unwrap();
        let last: DateKey = "2024-03-31".parse().unwrap();
        let other: DateKey = "2024-04-01".parse().unwrap();
        assert_eq!(cell_index_of(cursor, first), Some(5));
        assert_eq!(cell_index_of(cursor, last), Some(35));
        assert_eq!(cell_index_of(cursor, other), None);
    }
}
