//! Active fire detection model

use super::GeoPoint;
use crate::{AirCastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One active-fire detection from a satellite fire feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Fire {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Brightness temperature in Kelvin
    pub brightness: f64,
    /// Fire radiative power in MW
    pub frp: f64,
    /// Detection confidence as reported by the feed ("low", "nominal", "85", ...)
    pub confidence: String,
    /// Acquisition date
    pub acq_date: NaiveDate,
    /// Acquisition time as HHMM (UTC)
    pub acq_time: String,
    /// Satellite or instrument name
    pub satellite: String,
}

impl Fire {
    /// Location of the detection
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Check coordinates and fire radiative power
    pub fn validate(&self) -> Result<()> {
        self.location().validate()?;
        if !self.frp.is_finite() || self.frp < 0.0 {
            return Err(AirCastError::validation(format!(
                "Fire radiative power must be non-negative, got {}",
                self.frp
            )));
        }
        Ok(())
    }
}
