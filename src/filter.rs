//! Order-preserving selection of rows by calendar window.
//!
//! Rows whose date column is `None` never match and never raise.

use crate::window::DateWindow;
use chrono::{Datelike, NaiveDate};

pub fn filter_by_month<'a, T, F>(
    records: impl IntoIterator<Item = &'a T>,
    column: F,
    month: u32,
    year: i32,
) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    F: Fn(&T) -> Option<NaiveDate>,
{
    records
        .into_iter()
        .filter(|record| {
            column(record).is_some_and(|date| date.month() == month && date.year() == year)
        })
        .collect()
}

pub fn filter_by_day<'a, T, F>(
    records: impl IntoIterator<Item = &'a T>,
    column: F,
    day: NaiveDate,
) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    F: Fn(&T) -> Option<NaiveDate>,
{
    records
        .into_iter()
        .filter(|record| column(record) == Some(day))
        .collect()
}

/// Rows dated in the window's current month and year.
pub fn filter_current_month<'a, T, F>(
    records: impl IntoIterator<Item = &'a T>,
    column: F,
    window: &DateWindow,
) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    F: Fn(&T) -> Option<NaiveDate>,
{
    filter_by_month(records, column, window.month, window.year)
}

/// Rows dated on the window's yesterday.
pub fn filter_yesterday<'a, T, F>(
    records: impl IntoIterator<Item = &'a T>,
    column: F,
    window: &DateWindow,
) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    F: Fn(&T) -> Option<NaiveDate>,
{
    filter_by_day(records, column, window.yesterday)
}
