//! Country lookup collaborators
//!
//! Season resolution never depends on these. A [`CountryResolver`] turns a
//! coordinate pair into a country name, `Ok(None)` when the point lies in
//! open ocean or unmapped territory.

pub mod cache;
pub mod geojson;
pub mod nominatim;

use crate::config::AllSeasonsConfig;
use anyhow::{Context, Result, anyhow};
use std::time::Duration;
use tracing::info;

pub use cache::CachedResolver;
pub use geojson::GeoJsonResolver;
pub use nominatim::NominatimResolver;

/// Reverse geocoding from coordinates to a country name
pub trait CountryResolver: Send + Sync {
    fn resolve_country(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

impl<R: CountryResolver + ?Sized> CountryResolver for Box<R> {
    fn resolve_country(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        (**self).resolve_country(latitude, longitude)
    }
}

/// Resolver that never knows a country
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl CountryResolver for NoopResolver {
    fn resolve_country(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Build the resolver described by `config`, wrapped in the disk cache when enabled.
///
/// The configuration is validated first, so out-of-range settings never
/// reach a resolver.
pub fn resolver_from_config(config: &AllSeasonsConfig) -> Result<Box<dyn CountryResolver>> {
    config.validate()?;
    let geocoding = &config.geocoding;
    let resolver: Box<dyn CountryResolver> = match geocoding.provider.as_str() {
        "none" => Box::new(NoopResolver),
        "geojson" => {
            let path = geocoding
                .dataset_path
                .as_ref()
                .ok_or_else(|| anyhow!("geojson provider requires a dataset path"))?;
            Box::new(GeoJsonResolver::from_path(path, &geocoding.name_property)?)
        }
        "nominatim" => Box::new(NominatimResolver::new(geocoding)?),
        other => return Err(anyhow!("Unknown geocoding provider: {other}")),
    };
    info!("Using '{}' country resolver", geocoding.provider);

    if !config.cache.enabled {
        return Ok(resolver);
    }

    let directory = config.cache.directory();
    let ttl = Duration::from_secs(u64::from(config.cache.ttl_hours) * 3600);
    let cached = CachedResolver::open(resolver, &directory, ttl)
        .with_context(|| format!("Failed to open country cache at {}", directory.display()))?;
    Ok(Box::new(cached))
}
