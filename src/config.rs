//! Configuration management for the `allseasons` crate
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SeasonsError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllSeasonsConfig {
    /// Country lookup configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Country lookup cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Country lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Resolver to use (none, geojson, nominatim)
    #[serde(default = "default_geocoding_provider")]
    pub provider: String,
    /// GeoJSON country boundaries for the offline resolver
    pub dataset_path: Option<PathBuf>,
    /// Feature property holding the country name
    #[serde(default = "default_name_property")]
    pub name_property: String,
    /// Base URL of the Nominatim-compatible reverse geocoding service
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_geocoding_max_retries")]
    pub max_retries: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether country lookups are cached on disk
    #[serde(default)]
    pub enabled: bool,
    /// Cache TTL in hours
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_provider() -> String {
    "none".to_string()
}

fn default_name_property() -> String {
    "name".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_geocoding_max_retries() -> u32 {
    2
}

fn default_user_agent() -> String {
    format!("allseasons/{}", crate::VERSION)
}

fn default_cache_ttl() -> u32 {
    24 * 30
}

fn default_cache_location() -> String {
    "~/.cache/allseasons".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: default_geocoding_provider(),
            dataset_path: None,
            name_property: default_name_property(),
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
            max_retries: default_geocoding_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_hours: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CacheConfig {
    /// Cache directory with a leading `~` expanded to the home directory
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        match self.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.location)),
            None => PathBuf::from(&self.location),
        }
    }
}

impl AllSeasonsConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides such as ALLSEASONS_GEOCODING__PROVIDER
        builder = builder.add_source(
            Environment::with_prefix("ALLSEASONS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AllSeasonsConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("allseasons").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.provider.is_empty() {
            self.geocoding.provider = default_geocoding_provider();
        }
        if self.geocoding.name_property.is_empty() {
            self.geocoding.name_property = default_name_property();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.cache.ttl_hours == 0 {
            self.cache.ttl_hours = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_geocoding()?;
        self.validate_numeric_ranges()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_geocoding(&self) -> Result<()> {
        let valid_providers = ["none", "geojson", "nominatim"];
        if !valid_providers.contains(&self.geocoding.provider.as_str()) {
            return Err(SeasonsError::config(format!(
                "Invalid geocoding provider '{}'. Must be one of: {}",
                self.geocoding.provider,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.geocoding.provider == "geojson" && self.geocoding.dataset_path.is_none() {
            return Err(SeasonsError::config(
                "The geojson provider requires geocoding.dataset_path to be set",
            )
            .into());
        }

        if !self.geocoding.base_url.starts_with("http://")
            && !self.geocoding.base_url.starts_with("https://")
        {
            return Err(SeasonsError::config(
                "Geocoding base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds > 300 {
            return Err(
                SeasonsError::config("Geocoding timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.geocoding.max_retries > 10 {
            return Err(SeasonsError::config("Geocoding max retries cannot exceed 10").into());
        }

        if self.cache.ttl_hours > 24 * 365 {
            return Err(SeasonsError::config("Cache TTL cannot exceed 8760 hours (1 year)").into());
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SeasonsError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SeasonsError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
