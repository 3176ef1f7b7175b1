//! Error types and handling for the `allseasons` crate

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for season resolution and its collaborators
#[derive(Error, Debug)]
pub enum SeasonsError {
    /// Latitude or longitude outside the physical range
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// No member season of a set covers the date
    #[error("No season in '{season_set}' matches date {date}")]
    NoSeasonMatch { date: NaiveDate, season_set: String },

    /// A name (season, marker, convention, ...) that could not be parsed
    #[error("Unknown {kind}: '{value}'")]
    UnknownName { kind: &'static str, value: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Country lookup errors
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl SeasonsError {
    /// Create a new invalid coordinate error
    #[must_use]
    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinate {
            latitude,
            longitude,
        }
    }

    /// Create a new unknown name error
    pub fn unknown_name<S: Into<String>>(kind: &'static str, value: S) -> Self {
        Self::UnknownName {
            kind,
            value: value.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let coord_err = SeasonsError::invalid_coordinate(91.0, 0.0);
        assert!(matches!(coord_err, SeasonsError::InvalidCoordinate { .. }));

        let config_err = SeasonsError::config("bad provider");
        assert!(matches!(config_err, SeasonsError::Config { .. }));

        let name_err = SeasonsError::unknown_name("season", "monsoon");
        assert_eq!(name_err.to_string(), "Unknown season: 'monsoon'");
    }

    #[test]
    fn test_no_season_match_display() {
        let err = SeasonsError::NoSeasonMatch {
            date: NaiveDate::from_ymd_opt(2017, 3, 19).unwrap(),
            season_set: "custom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No season in 'custom' matches date 2017-03-19"
        );
    }

    #[test]
    fn test_cache_error_display() {
        let err = SeasonsError::cache("Failed to open cache database: locked");
        assert!(matches!(err, SeasonsError::Cache { .. }));
        assert_eq!(
            err.to_string(),
            "Cache error: Failed to open cache database: locked"
        );
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeasonsError>();
    }
}
