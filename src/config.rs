//! Configuration management for the itinerary planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Geocoding service settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Points-of-interest service settings
    #[serde(default)]
    pub poi: PoiConfig,
    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Aggregation behaviour
    #[serde(default)]
    pub itinerary: ItineraryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP API listener
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Nominatim-compatible search API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Country filter passed to every lookup (ISO 3166-1 alpha-2, comma separated)
    #[serde(default = "default_country_codes")]
    pub country_codes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiConfig {
    /// Base URL for the Overpass API
    #[serde(default = "default_poi_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Whether providers may reach their external services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Query external services, synthesizing only on failure
    #[default]
    Live,
    /// Never leave the process; every section is synthesized
    Offline,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItineraryConfig {
    #[serde(default)]
    pub mode: DataMode,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_country_codes() -> String {
    "in".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_poi_base_url() -> String {
    "https://overpass-api.de/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("yatra/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            country_codes: default_country_codes(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for PoiConfig {
    fn default() -> Self {
        Self {
            base_url: default_poi_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // YATRA_HTTP__TIMEOUT_SECONDS=10 overrides http.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("YATRA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yatra").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.country_codes.is_empty() {
            self.geocoding.country_codes = default_country_codes();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.poi.base_url.is_empty() {
            self.poi.base_url = default_poi_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
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
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(
                PlannerError::config("HTTP timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.port == 0 {
            return Err(PlannerError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
            ("Points-of-interest", &self.poi.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        let codes_ok = self
            .geocoding
            .country_codes
            .split(',')
            .all(|code| code.trim().len() == 2 && code.trim().chars().all(|c| c.is_ascii_alphabetic()));
        if !codes_ok {
            return Err(PlannerError::config(format!(
                "Invalid country filter '{}'. Expected two-letter codes separated by commas",
                self.geocoding.country_codes
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "yatra-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.geocoding.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.geocoding.country_codes, "in");
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.poi.base_url, "https://overpass-api.de/api");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.itinerary.mode, DataMode::Live);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PlannerConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_bad_url() {
        let mut config = PlannerConfig::default();
        config.poi.base_url = "overpass-api.de/api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Points-of-interest API base URL"));
    }

    #[test]
    fn test_config_validation_rejects_bad_country_filter() {
        let mut config = PlannerConfig::default();
        config.geocoding.country_codes = "india".to_string();
        assert!(config.validate().is_err());

        config.geocoding.country_codes = "in,np".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = PlannerConfig::default();
        config.weather.base_url = String::new();
        config.http.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config(
            "load",
            r#"
[itinerary]
mode = "offline"

[weather]
base_url = "http://localhost:9000/v1"

[logging]
format = "json"
"#,
        );

        let config = PlannerConfig::load_from_path(Some(path.clone())).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.itinerary.mode, DataMode::Offline);
        assert_eq!(config.weather.base_url, "http://localhost:9000/v1");
        assert_eq!(config.logging.format, "json");
        // untouched sections keep their defaults
        assert_eq!(config.geocoding.country_codes, "in");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let path = temp_config(
            "invalid",
            r#"
[logging]
level = "loud"
"#,
        );

        let result = PlannerConfig::load_from_path(Some(path.clone()));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = PlannerConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("yatra"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
