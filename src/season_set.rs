//! Season sets and the four predefined hemisphere/convention catalogs

use crate::SeasonsError;
use crate::astronomy::{Marker, MonthDay};
use crate::models::{Hemisphere, Location};
use crate::season::{Convention, Season, SeasonName};
use chrono::NaiveDate;
use tracing::{debug, error};

/// Four seasons that partition the year for one hemisphere and convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSet {
    pub name: &'static str,
    pub hemisphere: Hemisphere,
    pub convention: Convention,
    pub seasons: [Season; 4],
}

impl SeasonSet {
    #[must_use]
    pub const fn new(
        name: &'static str,
        hemisphere: Hemisphere,
        convention: Convention,
        seasons: [Season; 4],
    ) -> Self {
        Self {
            name,
            hemisphere,
            convention,
            seasons,
        }
    }

    /// Name of the season covering `date`.
    ///
    /// Boundary data that leaves `date` uncovered yields
    /// [`SeasonsError::NoSeasonMatch`]. Overlapping seasons are a catalog bug:
    /// debug builds panic, release builds log and use the first match.
    pub fn get_season(&self, date: &NaiveDate) -> crate::Result<SeasonName> {
        let mut matches = self
            .seasons
            .iter()
            .filter(|season| season.valid_for(date, self.convention))
            .map(|season| season.name);

        let first = matches.next().ok_or_else(|| SeasonsError::NoSeasonMatch {
            date: *date,
            season_set: self.name.to_string(),
        })?;

        let extra: Vec<SeasonName> = matches.collect();
        if !extra.is_empty() {
            error!(
                "Season set '{}' has overlapping seasons on {}: {} and {:?}",
                self.name, date, first, extra
            );
            debug_assert!(
                extra.is_empty(),
                "season set '{}' matches several seasons on {date}",
                self.name
            );
        }

        debug!("{} falls in {} under '{}'", date, first, self.name);
        Ok(first)
    }

    /// Whether this set applies to the hemisphere of `location`
    #[must_use]
    pub fn valid_for(&self, location: &Location) -> bool {
        location.hemisphere() == self.hemisphere
    }

    /// The predefined set for the hemisphere of `location` under `convention`
    #[must_use]
    pub fn for_location(location: &Location, convention: Convention) -> &'static SeasonSet {
        match (location.hemisphere(), convention) {
            (Hemisphere::Northern, Convention::Meteorological) => &NORTHERN_METEOROLOGICAL,
            (Hemisphere::Northern, Convention::Astronomical) => &NORTHERN_ASTRONOMICAL,
            (Hemisphere::Southern, Convention::Meteorological) => &SOUTHERN_METEOROLOGICAL,
            (Hemisphere::Southern, Convention::Astronomical) => &SOUTHERN_ASTRONOMICAL,
        }
    }
}

/// Season at `location` on `date` under `convention`
pub fn season_at(
    location: &Location,
    date: &NaiveDate,
    convention: Convention,
) -> crate::Result<SeasonName> {
    SeasonSet::for_location(location, convention).get_season(date)
}

const MAR_1: MonthDay = MonthDay::new(3, 1);
const JUN_1: MonthDay = MonthDay::new(6, 1);
const SEP_1: MonthDay = MonthDay::new(9, 1);
const DEC_1: MonthDay = MonthDay::new(12, 1);

const NORTHERN_SEASONS: [Season; 4] = [
    Season::new(SeasonName::Spring, (MAR_1, JUN_1), (Marker::March, Marker::June)),
    Season::new(SeasonName::Summer, (JUN_1, SEP_1), (Marker::June, Marker::Sept)),
    Season::new(SeasonName::Autumn, (SEP_1, DEC_1), (Marker::Sept, Marker::Dec)),
    Season::new(SeasonName::Winter, (DEC_1, MAR_1), (Marker::Dec, Marker::March)),
];

// Same quarters as the north, shifted by half a year.
const SOUTHERN_SEASONS: [Season; 4] = [
    Season::new(SeasonName::Spring, (SEP_1, DEC_1), (Marker::Sept, Marker::Dec)),
    Season::new(SeasonName::Summer, (DEC_1, MAR_1), (Marker::Dec, Marker::March)),
    Season::new(SeasonName::Autumn, (MAR_1, JUN_1), (Marker::March, Marker::June)),
    Season::new(SeasonName::Winter, (JUN_1, SEP_1), (Marker::June, Marker::Sept)),
];

pub static NORTHERN_METEOROLOGICAL: SeasonSet = SeasonSet::new(
    "northern_meteo",
    Hemisphere::Northern,
    Convention::Meteorological,
    NORTHERN_SEASONS,
);

pub static NORTHERN_ASTRONOMICAL: SeasonSet = SeasonSet::new(
    "northern_astro",
    Hemisphere::Northern,
    Convention::Astronomical,
    NORTHERN_SEASONS,
);

pub static SOUTHERN_METEOROLOGICAL: SeasonSet = SeasonSet::new(
    "southern_meteo",
    Hemisphere::Southern,
    Convention::Meteorological,
    SOUTHERN_SEASONS,
);

pub static SOUTHERN_ASTRONOMICAL: SeasonSet = SeasonSet::new(
    "southern_astro",
    Hemisphere::Southern,
    Convention::Astronomical,
    SOUTHERN_SEASONS,
);

/// Every predefined set
pub static ALL_SEASON_SETS: [&SeasonSet; 4] = [
    &NORTHERN_METEOROLOGICAL,
    &NORTHERN_ASTRONOMICAL,
    &SOUTHERN_METEOROLOGICAL,
    &SOUTHERN_ASTRONOMICAL,
];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LONDON: (f64, f64) = (51.507_351, -0.127_758);
    const BUENOS_AIRES: (f64, f64) = (-34.603_684, -58.381_559);

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_season_valid_for_southern_july() {
        let july = date(1983, 7, 3);
        for season in &SOUTHERN_METEOROLOGICAL.seasons {
            let expected = season.name == SeasonName::Winter;
            assert_eq!(
                season.valid_for(&july, SOUTHERN_METEOROLOGICAL.convention),
                expected,
                "{}",
                season.name
            );
        }
    }

    #[rstest]
    #[case(&NORTHERN_METEOROLOGICAL, SeasonName::Summer)]
    #[case(&NORTHERN_ASTRONOMICAL, SeasonName::Summer)]
    #[case(&SOUTHERN_METEOROLOGICAL, SeasonName::Winter)]
    #[case(&SOUTHERN_ASTRONOMICAL, SeasonName::Winter)]
    fn test_get_season_3_july(#[case] set: &SeasonSet, #[case] expected: SeasonName) {
        assert_eq!(set.get_season(&date(1983, 7, 3)).unwrap(), expected);
    }

    /// This date falls between the astronomical and meteorological seasons
    #[rstest]
    #[case(&NORTHERN_METEOROLOGICAL, SeasonName::Spring)]
    #[case(&NORTHERN_ASTRONOMICAL, SeasonName::Winter)]
    #[case(&SOUTHERN_METEOROLOGICAL, SeasonName::Autumn)]
    #[case(&SOUTHERN_ASTRONOMICAL, SeasonName::Summer)]
    fn test_get_season_19_march(#[case] set: &SeasonSet, #[case] expected: SeasonName) {
        assert_eq!(set.get_season(&date(2017, 3, 19)).unwrap(), expected);
    }

    #[rstest]
    #[case(LONDON, &NORTHERN_METEOROLOGICAL, true)]
    #[case(LONDON, &NORTHERN_ASTRONOMICAL, true)]
    #[case(LONDON, &SOUTHERN_METEOROLOGICAL, false)]
    #[case(LONDON, &SOUTHERN_ASTRONOMICAL, false)]
    #[case(BUENOS_AIRES, &SOUTHERN_METEOROLOGICAL, true)]
    #[case(BUENOS_AIRES, &NORTHERN_ASTRONOMICAL, false)]
    fn test_valid_for_location(
        #[case] coords: (f64, f64),
        #[case] set: &SeasonSet,
        #[case] expected: bool,
    ) {
        let location = Location::new(coords.0, coords.1).unwrap();
        assert_eq!(set.valid_for(&location), expected);
    }

    #[rstest]
    #[case(date(2017, 2, 28), SeasonName::Winter)]
    #[case(date(2017, 3, 1), SeasonName::Spring)]
    #[case(date(2017, 5, 31), SeasonName::Spring)]
    #[case(date(2017, 6, 1), SeasonName::Summer)]
    #[case(date(2017, 11, 30), SeasonName::Autumn)]
    #[case(date(2017, 12, 1), SeasonName::Winter)]
    fn test_meteorological_boundaries(#[case] day: NaiveDate, #[case] expected: SeasonName) {
        assert_eq!(NORTHERN_METEOROLOGICAL.get_season(&day).unwrap(), expected);
    }

    #[rstest]
    #[case(date(2017, 3, 20), SeasonName::Spring)]
    #[case(date(2017, 6, 20), SeasonName::Spring)]
    #[case(date(2017, 6, 21), SeasonName::Summer)]
    #[case(date(2017, 9, 22), SeasonName::Autumn)]
    #[case(date(2017, 12, 20), SeasonName::Autumn)]
    #[case(date(2017, 12, 21), SeasonName::Winter)]
    #[case(date(2018, 1, 1), SeasonName::Winter)]
    fn test_astronomical_boundaries(#[case] day: NaiveDate, #[case] expected: SeasonName) {
        assert_eq!(NORTHERN_ASTRONOMICAL.get_season(&day).unwrap(), expected);
    }

    #[test]
    fn test_for_location_picks_hemisphere() {
        let buenos_aires = Location::new(BUENOS_AIRES.0, BUENOS_AIRES.1).unwrap();
        let set = SeasonSet::for_location(&buenos_aires, Convention::Astronomical);
        assert_eq!(set, &SOUTHERN_ASTRONOMICAL);

        let london = Location::new(LONDON.0, LONDON.1).unwrap();
        let set = SeasonSet::for_location(&london, Convention::Meteorological);
        assert_eq!(set, &NORTHERN_METEOROLOGICAL);
    }

    #[test]
    fn test_season_at() {
        let buenos_aires = Location::new(BUENOS_AIRES.0, BUENOS_AIRES.1).unwrap();
        let season = season_at(&buenos_aires, &date(1983, 7, 3), Convention::Meteorological);
        assert_eq!(season.unwrap(), SeasonName::Winter);
    }

    #[test]
    fn test_gap_in_custom_set_is_an_error() {
        let summer_only = Season::new(
            SeasonName::Summer,
            (JUN_1, SEP_1),
            (Marker::June, Marker::Sept),
        );
        let set = SeasonSet::new(
            "gappy",
            Hemisphere::Northern,
            Convention::Meteorological,
            [summer_only; 4],
        );
        let result = set.get_season(&date(2017, 1, 15));
        assert!(matches!(
            result,
            Err(SeasonsError::NoSeasonMatch { ref season_set, .. }) if season_set == "gappy"
        ));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "matches several seasons")]
    fn test_overlap_in_custom_set_panics_in_debug() {
        let mut seasons = NORTHERN_SEASONS;
        seasons[3].meteo_start = Some(MonthDay::new(11, 1));
        let set = SeasonSet::new(
            "overlapping",
            Hemisphere::Northern,
            Convention::Meteorological,
            seasons,
        );
        let _ = set.get_season(&date(2017, 11, 15));
    }
}
