//! Configuration management for the `AirCast` library
//!
//! Handles loading calibration factors and forecast settings from a TOML
//! file and environment variables, and validates the result.

use crate::AirCastError;
use crate::factors::AdvectionFactors;
use crate::forecast::{DEFAULT_HOURS_AHEAD, DEFAULT_MAX_HOURS_AHEAD};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper limit for any forecast horizon (one week)
const MAX_SUPPORTED_HOURS_AHEAD: u32 = 168;

/// Root configuration structure for the `AirCast` library
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AirCastConfig {
    /// Calibration factors for the advection forecast
    #[serde(default)]
    pub factors: AdvectionFactors,
    /// Forecast horizon settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast horizon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Longest accepted horizon in hours
    #[serde(default = "default_max_hours_ahead")]
    pub max_hours_ahead: u32,
    /// Horizon used when the caller does not pick one
    #[serde(default = "default_hours_ahead")]
    pub default_hours_ahead: u32,
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
fn default_max_hours_ahead() -> u32 {
    DEFAULT_MAX_HOURS_AHEAD
}

fn default_hours_ahead() -> u32 {
    DEFAULT_HOURS_AHEAD
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_hours_ahead: default_max_hours_ahead(),
            default_hours_ahead: default_hours_ahead(),
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

impl AirCastConfig {
    /// Load configuration from `aircast.toml` (if present) and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    ///
    /// Environment variables prefixed with `AIRCAST_` override file values,
    /// using `__` between sections (e.g. `AIRCAST_FACTORS__WASHOUT_RATE`).
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("aircast.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("AIRCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AirCastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", config_file.display());

        Ok(config)
    }

    /// Apply default values to empty or zeroed fields
    pub fn apply_defaults(&mut self) {
        if self.forecast.max_hours_ahead == 0 {
            self.forecast.max_hours_ahead = default_max_hours_ahead();
        }
        if self.forecast.default_hours_ahead == 0 {
            self.forecast.default_hours_ahead = default_hours_ahead();
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
        self.factors
            .validate()
            .map_err(|e| AirCastError::config(e.to_string()))?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate forecast horizon ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.forecast.max_hours_ahead > MAX_SUPPORTED_HOURS_AHEAD {
            return Err(AirCastError::config(format!(
                "Forecast horizon cannot exceed {MAX_SUPPORTED_HOURS_AHEAD} hours"
            ))
            .into());
        }

        if self.forecast.default_hours_ahead > self.forecast.max_hours_ahead {
            return Err(AirCastError::config(
                "Default forecast horizon cannot exceed the maximum horizon",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirCastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AirCastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
