//! `allseasons` - Which season is it, here and now?
//!
//! This library resolves the meteorological or astronomical season for a
//! location and calendar date, accounting for hemisphere and for the
//! windows that wrap across New Year.

pub mod astronomy;
pub mod config;
pub mod date_range;
pub mod error;
pub mod geocoding;
pub mod logging;
pub mod models;
pub mod season;
pub mod season_set;

// Re-export core types for public API
pub use astronomy::{AstronomicalDates, Marker, MonthDay, astronomical_dates};
pub use config::AllSeasonsConfig;
pub use date_range::{between_dates, between_equinoxes};
pub use error::SeasonsError;
pub use geocoding::{CountryResolver, NoopResolver, resolver_from_config};
pub use models::{Hemisphere, Location};
pub use season::{Convention, Season, SeasonName};
pub use season_set::{
    ALL_SEASON_SETS, NORTHERN_ASTRONOMICAL, NORTHERN_METEOROLOGICAL, SOUTHERN_ASTRONOMICAL,
    SOUTHERN_METEOROLOGICAL, SeasonSet, season_at,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SeasonsError>;
