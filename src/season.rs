//! Seasons and the conventions used to bound them

use crate::SeasonsError;
use crate::astronomy::{Marker, MonthDay};
use crate::date_range::{between_dates, between_equinoxes};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonName {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl SeasonName {
    pub const ALL: [SeasonName; 4] = [
        SeasonName::Spring,
        SeasonName::Summer,
        SeasonName::Autumn,
        SeasonName::Winter,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SeasonName::Spring => "spring",
            SeasonName::Summer => "summer",
            SeasonName::Autumn => "autumn",
            SeasonName::Winter => "winter",
        }
    }
}

impl Display for SeasonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonName {
    type Err = SeasonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeasonName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SeasonsError::unknown_name("season", s))
    }
}

/// How season boundaries are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Fixed calendar quarters starting on the first of a month
    Meteorological,
    /// Quarters bounded by equinoxes and solstices
    Astronomical,
}

impl Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Convention::Meteorological => f.write_str("meteorological"),
            Convention::Astronomical => f.write_str("astronomical"),
        }
    }
}

impl FromStr for Convention {
    type Err = SeasonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meteorological" | "meteo" => Ok(Convention::Meteorological),
            "astronomical" | "astro" => Ok(Convention::Astronomical),
            _ => Err(SeasonsError::unknown_name("convention", s)),
        }
    }
}

/// A named season with its boundaries under both conventions.
///
/// Meteorological ends are exclusive: a season ending at `(6, 1)` covers
/// May 31 but not June 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    pub name: SeasonName,
    pub meteo_start: Option<MonthDay>,
    pub meteo_end: Option<MonthDay>,
    pub astro_start: Option<Marker>,
    pub astro_end: Option<Marker>,
}

impl Season {
    /// Season spanning a meteorological and an astronomical quarter
    #[must_use]
    pub const fn new(
        name: SeasonName,
        meteo: (MonthDay, MonthDay),
        astro: (Marker, Marker),
    ) -> Self {
        Self {
            name,
            meteo_start: Some(meteo.0),
            meteo_end: Some(meteo.1),
            astro_start: Some(astro.0),
            astro_end: Some(astro.1),
        }
    }

    /// Whether `date` lies inside this season under `convention`
    #[must_use]
    pub fn valid_for(&self, date: &NaiveDate, convention: Convention) -> bool {
        match convention {
            Convention::Meteorological => between_dates(date, self.meteo_start, self.meteo_end),
            Convention::Astronomical => between_equinoxes(date, self.astro_start, self.astro_end),
        }
    }
}
