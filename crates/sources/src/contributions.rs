//! Reshaping of the daily contribution sequence into a calendar grid.
//!
//! The grid is purely positional: day `i` of the input lands in week `i / 7`,
//! slot `i % 7`. Weeks are not aligned to real weekdays.

use crate::models::{CalendarDay, ContributionDay};

/// Number of weeks in the grid.
pub const WEEKS_PER_GRID: usize = 53;

/// Number of days per week.
pub const DAYS_PER_WEEK: usize = 7;

/// Chunks `days` into exactly 53 weeks of 7 days.
///
/// Slots past the end of the input are filled with [`CalendarDay::empty`];
/// days past the last slot (index 371 and up) are dropped.
pub fn reshape_weeks(days: &[ContributionDay]) -> Vec<[CalendarDay; DAYS_PER_WEEK]> {
    (0..WEEKS_PER_GRID)
        .map(|week| {
            std::array::from_fn(|slot| {
                days.get(week * DAYS_PER_WEEK + slot)
                    .map(CalendarDay::from)
                    .unwrap_or_else(CalendarDay::empty)
            })
        })
        .collect()
}
