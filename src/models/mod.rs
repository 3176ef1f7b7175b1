//! Data models for the allseasons crate
//!
//! - Location: Geographic coordinates, hemisphere and country lookup

pub mod location;

pub use location::{Hemisphere, Location};
