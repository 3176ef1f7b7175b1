//! Reverse geocoding client for Nominatim-compatible services
//!
//! Only the country is of interest, so requests ask for the coarsest zoom
//! level and read `address.country` from the `jsonv2` response.

use super::CountryResolver;
use crate::SeasonsError;
use crate::config::GeocodingConfig;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    error: Option<String>,
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    country: Option<String>,
}

/// Delay before retry `attempt` (1-based), doubling from 500ms and capped at 30s
fn backoff(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(2).min(16);
    Duration::from_millis(500_u64.saturating_mul(1 << exponent)).min(Duration::from_secs(30))
}

/// Blocking HTTP resolver
pub struct NominatimResolver {
    client: Client,
    base_url: String,
    max_retries: u32,
}

impl NominatimResolver {
    /// Create a new client from geocoding settings
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    fn reverse_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/reverse?format=jsonv2&lat={latitude}&lon={longitude}&zoom=3&accept-language=en",
            self.base_url
        )
    }

    /// Fetch and decode a JSON response, retrying transport errors and retryable statuses
    fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let max_attempts = self.max_retries.saturating_add(1);
        let request_start = Instant::now();
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = backoff(attempt);
                debug!("Retrying in {:.1}s", delay.as_secs_f64());
                thread::sleep(delay);
            }

            debug!("Making HTTP request (attempt {attempt}/{max_attempts})");
            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        debug!(
                            "Reverse geocoding succeeded in {:.3}s",
                            request_start.elapsed().as_secs_f64()
                        );
                        return response
                            .json::<T>()
                            .with_context(|| "Invalid reverse geocoding response");
                    }
                    if status.is_server_error() || status.as_u16() == 429 {
                        warn!("Reverse geocoding returned HTTP {status}");
                        last_error = Some(SeasonsError::geocoding(format!("HTTP {status}")));
                        continue;
                    }
                    return Err(SeasonsError::geocoding(format!(
                        "Reverse geocoding failed with HTTP {status}"
                    ))
                    .into());
                }
                Err(e) => {
                    warn!("Reverse geocoding request failed: {e}");
                    last_error = Some(SeasonsError::geocoding(e.to_string()));
                }
            }
        }

        let cause = last_error.map(|e| e.to_string()).unwrap_or_default();
        Err(SeasonsError::geocoding(format!(
            "Reverse geocoding failed after {max_attempts} attempts: {cause}"
        ))
        .into())
    }
}

/// Country named by a `jsonv2` reverse geocoding response
fn country_of(response: ReverseResponse) -> Option<String> {
    if let Some(error) = response.error {
        debug!("No place found: {error}");
        return None;
    }
    response.address.and_then(|address| address.country)
}

impl CountryResolver for NominatimResolver {
    #[instrument(skip(self))]
    fn resolve_country(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let response: ReverseResponse = self.fetch(&self.reverse_url(latitude, longitude))?;
        Ok(country_of(response))
    }
}
