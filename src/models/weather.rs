//! Weather conditions model

use crate::factors::MS_TO_KMH;
use crate::{AirCastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single point-in-time, point-in-space weather sample
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherConditions {
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Direction the wind blows from, in degrees (0 = North, 90 = East)
    pub wind_direction: f64,
    /// Planetary boundary layer height in meters
    pub pbl_height: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Precipitation amount in mm
    pub precipitation: f64,
    /// Timestamp for this observation
    pub timestamp: DateTime<Utc>,
}

impl WeatherConditions {
    /// Wind speed converted to km/h
    #[must_use]
    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed * MS_TO_KMH
    }

    /// Check physical plausibility of the sample
    pub fn validate(&self) -> Result<()> {
        if !self.wind_speed.is_finite() || self.wind_speed < 0.0 {
            return Err(AirCastError::validation(format!(
                "Wind speed must be a finite non-negative value, got {}",
                self.wind_speed
            )));
        }
        if !self.wind_direction.is_finite() {
            return Err(AirCastError::validation("Wind direction must be finite"));
        }
        if !self.pbl_height.is_finite() || self.pbl_height <= 0.0 {
            return Err(AirCastError::validation(format!(
                "PBL height must be positive, got {}",
                self.pbl_height
            )));
        }
        if !self.precipitation.is_finite() || self.precipitation < 0.0 {
            return Err(AirCastError::validation(format!(
                "Precipitation cannot be negative, got {}",
                self.precipitation
            )));
        }
        Ok(())
    }
}
