//! Location model for geographic coordinates and metadata

use crate::SeasonsError;
use crate::geocoding::CountryResolver;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

/// Half of the globe a location lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// The equator itself counts as northern
    #[must_use]
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::Southern
        } else {
            Hemisphere::Northern
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Hemisphere::Northern => "northern",
            Hemisphere::Southern => "southern",
        }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hemisphere {
    type Err = SeasonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northern" => Ok(Hemisphere::Northern),
            "southern" => Ok(Hemisphere::Southern),
            _ => Err(SeasonsError::unknown_name("hemisphere", s)),
        }
    }
}

#[derive(Deserialize)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "Coordinates")]
pub struct Location {
    /// Latitude in decimal degrees
    latitude: f64,
    /// Longitude in decimal degrees
    longitude: f64,
}

impl TryFrom<Coordinates> for Location {
    type Error = SeasonsError;

    fn try_from(value: Coordinates) -> Result<Self, Self::Error> {
        Location::new(value.latitude, value.longitude)
    }
}

impl Location {
    /// Create a new location, rejecting coordinates outside the globe
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(SeasonsError::invalid_coordinate(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_latitude(self.latitude)
    }

    /// Country containing this location, if the resolver knows one.
    ///
    /// Resolver failures are logged and reported as an unresolved country.
    pub fn country(&self, resolver: &dyn CountryResolver) -> Option<String> {
        match resolver.resolve_country(self.latitude, self.longitude) {
            Ok(country) => {
                debug!(
                    "Resolved country for {}: {:?}",
                    self.format_coordinates(),
                    country
                );
                country
            }
            Err(e) => {
                warn!(
                    "Country lookup failed for {}: {:#}",
                    self.format_coordinates(),
                    e
                );
                None
            }
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Generate cache key for country lookups at this location.
    ///
    /// Coordinates are written in full (shortest round-trip form), so two
    /// distinct points never share a key. Negative zero is folded into zero.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let lat = self.latitude + 0.0;
        let lon = self.longitude + 0.0;
        format!("country:{lat}:{lon}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use rstest::rstest;

    struct FixedResolver(Option<&'static str>);

    impl CountryResolver for FixedResolver {
        fn resolve_country(&self, _latitude: f64, _longitude: f64) -> anyhow::Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct FailingResolver;

    impl CountryResolver for FailingResolver {
        fn resolve_country(&self, _latitude: f64, _longitude: f64) -> anyhow::Result<Option<String>> {
            Err(anyhow!("service unavailable"))
        }
    }

    #[rstest]
    #[case::london(51.507_351, -0.127_758, Hemisphere::Northern)]
    #[case::murmansk(68.958_524, 33.082_66, Hemisphere::Northern)]
    #[case::buenos_aires(-34.603_684, -58.381_559, Hemisphere::Southern)]
    #[case::melbourne(-37.813_628, 144.963_058, Hemisphere::Southern)]
    #[case::equator(0.0, -109.20, Hemisphere::Northern)]
    #[case::south_pole(-90.0, 0.0, Hemisphere::Southern)]
    fn test_hemisphere(#[case] lat: f64, #[case] lon: f64, #[case] expected: Hemisphere) {
        let location = Location::new(lat, lon).unwrap();
        assert_eq!(location.hemisphere(), expected);
    }

    #[rstest]
    #[case(90.1, 0.0)]
    #[case(-90.1, 0.0)]
    #[case(0.0, 180.5)]
    #[case(0.0, -181.0)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn test_invalid_coordinates(#[case] lat: f64, #[case] lon: f64) {
        let result = Location::new(lat, lon);
        assert!(matches!(result, Err(SeasonsError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_country_delegates_to_resolver() {
        let location = Location::new(-34.6, -58.4).unwrap();
        assert_eq!(
            location.country(&FixedResolver(Some("Argentina"))),
            Some("Argentina".to_string())
        );
        assert_eq!(location.country(&FixedResolver(None)), None);
    }

    #[test]
    fn test_country_failure_is_unresolved() {
        let location = Location::new(51.5, -0.13).unwrap();
        assert_eq!(location.country(&FailingResolver), None);
    }

    #[test]
    fn test_location_cache_key() {
        let location = Location::new(46.8182, 8.2275).unwrap();
        assert_eq!(location.cache_key(), "country:46.8182:8.2275");
    }

    #[test]
    fn test_cache_key_keeps_full_precision() {
        let west = Location::new(0.5, 0.001).unwrap();
        let east = Location::new(0.5, 0.004).unwrap();
        assert_ne!(west.cache_key(), east.cache_key());

        let nearly = Location::new(46.818_234_1, 8.2275).unwrap();
        let exact = Location::new(46.818_234, 8.2275).unwrap();
        assert_ne!(nearly.cache_key(), exact.cache_key());
    }

    #[test]
    fn test_cache_key_folds_negative_zero() {
        let negative = Location::new(-0.0, -0.0).unwrap();
        let positive = Location::new(0.0, 0.0).unwrap();
        assert_eq!(negative.cache_key(), positive.cache_key());
        assert_eq!(positive.cache_key(), "country:0:0");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Location = serde_json::from_str(r#"{"latitude": 51.5, "longitude": -0.13}"#).unwrap();
        assert_eq!(ok.hemisphere(), Hemisphere::Northern);

        let bad = serde_json::from_str::<Location>(r#"{"latitude": 120.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_hemisphere_parsing() {
        assert_eq!("Southern".parse::<Hemisphere>().unwrap(), Hemisphere::Southern);
        assert!("eastern".parse::<Hemisphere>().is_err());
    }
}
