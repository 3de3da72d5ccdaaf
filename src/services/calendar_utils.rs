use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::schedule::MonthWindow;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|err| {
        AppError::validation_with_details(
            "invalid date, expected YYYY-MM-DD",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday to Friday dates in `[start, end]`, in order. Empty when `start > end`.
pub fn weekdays_in_range(start: NaiveDate, end: NaiveDate) -> WeekdayIter {
    WeekdayIter {
        next: (start <= end).then_some(start),
        end,
    }
}

/// Lazy weekday walk; clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct WeekdayIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for WeekdayIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(current) = self.next {
            self.next = current.succ_opt().filter(|next| *next <= self.end);
            if is_weekday(current) {
                return Some(current);
            }
        }
        None
    }
}

/// First and last day of the calendar month containing `reference`.
pub fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = reference.with_day(1).unwrap_or(reference);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

pub fn month_window(reference: NaiveDate) -> MonthWindow {
    let (start, end) = month_bounds(reference);
    MonthWindow { start, end }
}

/// First day of the month `offset` months after the month containing `reference`.
pub fn shift_months(reference: NaiveDate, offset: u32) -> Option<NaiveDate> {
    let (first, _) = month_bounds(reference);
    first.checked_add_months(Months::new(offset))
}

pub fn last_day_of_month(reference: NaiveDate) -> NaiveDate {
    month_bounds(reference).1
}

pub fn month_label(reference: NaiveDate) -> String {
    reference.format("%b %Y").to_string()
}
