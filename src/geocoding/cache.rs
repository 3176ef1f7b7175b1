use super::CountryResolver;
use crate::SeasonsError;
use crate::models::Location;
use fjall::Keyspace;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    country: Option<String>,
    expires_at: u64, // Unix timestamp (seconds)
}

/// Persistent TTL cache in front of another resolver.
///
/// Keys are the exact coordinates, so a cached answer is only ever reused
/// for the very point it was looked up for. Unresolved lookups are cached
/// as well.
pub struct CachedResolver<R> {
    inner: R,
    store: Keyspace,
    ttl: Duration,
}

fn cache_error(action: &str, err: impl std::fmt::Display) -> SeasonsError {
    SeasonsError::cache(format!("{action}: {err}"))
}

fn now_secs() -> crate::Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| cache_error("System clock before Unix epoch", e))?
        .as_secs())
}

impl<R: CountryResolver> CachedResolver<R> {
    pub fn open(inner: R, path: impl AsRef<Path>, ttl: Duration) -> crate::Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| cache_error("Failed to open cache database", e))?;
        let store = db
            .keyspace("countries", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| cache_error("Failed to open cache keyspace", e))?;
        Ok(Self { inner, store, ttl })
    }

    /// Retrieves a cached lookup if it exists and has not expired.
    #[tracing::instrument(name = "query_country_cache", level = "debug", skip(self))]
    fn get(&self, key: &str) -> crate::Result<Option<Option<String>>> {
        let Some(bytes) = self
            .store
            .get(key.as_bytes().to_vec())
            .map_err(|e| cache_error("Failed to read cache entry", e))?
            .map(|v| v.to_vec())
        else {
            debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry = postcard::from_bytes(&bytes)
            .map_err(|e| cache_error("Corrupt cache entry", e))?;
        if now_secs()? < entry.expires_at {
            debug!("Key found and still fresh");
            Ok(Some(entry.country))
        } else {
            debug!("Key found but expired");
            self.store
                .remove(key.as_bytes().to_vec())
                .map_err(|e| cache_error("Failed to remove expired entry", e))?;
            Ok(None)
        }
    }

    #[tracing::instrument(name = "put_country_cache", level = "debug", skip(self))]
    fn put(&self, key: &str, country: Option<String>) -> crate::Result<()> {
        let expires_at = now_secs()?.saturating_add(self.ttl.as_secs());
        let bytes = postcard::to_stdvec(&StoredEntry {
            country,
            expires_at,
        })
        .map_err(|e| cache_error("Failed to encode cache entry", e))?;
        self.store
            .insert(key.as_bytes().to_vec(), bytes)
            .map_err(|e| cache_error("Failed to write cache entry", e))?;
        Ok(())
    }
}

impl<R: CountryResolver> CountryResolver for CachedResolver<R> {
    fn resolve_country(&self, latitude: f64, longitude: f64) -> anyhow::Result<Option<String>> {
        let Ok(location) = Location::new(latitude, longitude) else {
            return self.inner.resolve_country(latitude, longitude);
        };
        let key = location.cache_key();

        match self.get(&key) {
            Ok(Some(country)) => return Ok(country),
            Ok(None) => {}
            Err(e) => warn!("Country cache read failed for {key}: {e:#}"),
        }

        let country = self.inner.resolve_country(latitude, longitude)?;
        if let Err(e) = self.put(&key, country.clone()) {
            warn!("Country cache write failed for {key}: {e:#}");
        }
        Ok(country)
    }
}
