//! Date-interval predicates that ignore the year
//!
//! Windows are half-open: the start day is included, the end day is not.
//! A window whose start comes after its end wraps across New Year.

use crate::astronomy::{Marker, MonthDay, astronomical_dates};
use chrono::{Datelike, NaiveDate};

/// Shared window test used by both predicates
fn within(day: MonthDay, start: Option<MonthDay>, end: Option<MonthDay>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) if start <= end => start <= day && day < end,
        (Some(start), Some(end)) => day >= start || day < end,
        (Some(start), None) => day >= start,
        (None, Some(end)) => day < end,
        (None, None) => true,
    }
}

/// Whether `date` falls within `[start, end)` compared on month and day only.
///
/// A missing `start` leaves the window open towards January 1, a missing
/// `end` leaves it open towards December 31, and with neither bound every
/// date matches.
#[must_use]
pub fn between_dates(date: &NaiveDate, start: Option<MonthDay>, end: Option<MonthDay>) -> bool {
    within(MonthDay::of(date), start, end)
}

/// Whether `date` falls between two equinox/solstice markers of its own year.
#[must_use]
pub fn between_equinoxes(date: &NaiveDate, start: Option<Marker>, end: Option<Marker>) -> bool {
    let resolve = |marker: Marker| match astronomical_dates(date.year()) {
        Some(dates) => MonthDay::of(&dates.get(marker)),
        None => marker.nominal_day(),
    };
    within(MonthDay::of(date), start.map(resolve), end.map(resolve))
}
