//! Equinox and solstice dates
//!
//! The four yearly turning points are approximated by fixed calendar days
//! (March 20, June 21, September 22, December 21). The error against the
//! true orbital instants is on the order of a day across centuries.

use crate::SeasonsError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A calendar day ignoring the year, ordered by month then day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    #[must_use]
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Month and day of a concrete date
    #[must_use]
    pub fn of(date: &NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }

    /// Place this day in `year`; `None` for Feb 29 in a common year
    #[must_use]
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl From<(u32, u32)> for MonthDay {
    fn from((month, day): (u32, u32)) -> Self {
        Self::new(month, day)
    }
}

/// One of the four astronomical turning points of a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// March equinox
    March,
    /// June solstice
    June,
    /// September equinox
    Sept,
    /// December solstice
    Dec,
}

impl Marker {
    /// All markers in calendar order
    pub const ALL: [Marker; 4] = [Marker::March, Marker::June, Marker::Sept, Marker::Dec];

    /// Nominal calendar day on which the turning point falls
    #[must_use]
    pub const fn nominal_day(self) -> MonthDay {
        match self {
            Marker::March => MonthDay::new(3, 20),
            Marker::June => MonthDay::new(6, 21),
            Marker::Sept => MonthDay::new(9, 22),
            Marker::Dec => MonthDay::new(12, 21),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Marker::March => "march",
            Marker::June => "june",
            Marker::Sept => "sept",
            Marker::Dec => "dec",
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Marker {
    type Err = SeasonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::ALL
            .into_iter()
            .find(|marker| marker.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SeasonsError::unknown_name("marker", s))
    }
}

/// Equinox and solstice dates of a single year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstronomicalDates {
    pub march: NaiveDate,
    pub june: NaiveDate,
    pub sept: NaiveDate,
    pub dec: NaiveDate,
}

impl AstronomicalDates {
    #[must_use]
    pub fn get(&self, marker: Marker) -> NaiveDate {
        match marker {
            Marker::March => self.march,
            Marker::June => self.june,
            Marker::Sept => self.sept,
            Marker::Dec => self.dec,
        }
    }

    /// Marker/date pairs in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Marker, NaiveDate)> + use<> {
        let dates = *self;
        Marker::ALL.into_iter().map(move |marker| (marker, dates.get(marker)))
    }
}

/// Compute the equinox and solstice dates for `year`.
///
/// Returns `None` only when `year` lies outside the range chrono can
/// represent; every other year yields all four dates.
#[must_use]
pub fn astronomical_dates(year: i32) -> Option<AstronomicalDates> {
    Some(AstronomicalDates {
        march: Marker::March.nominal_day().in_year(year)?,
        june: Marker::June.nominal_day().in_year(year)?,
        sept: Marker::Sept.nominal_day().in_year(year)?,
        dec: Marker::Dec.nominal_day().in_year(year)?,
    })
}
