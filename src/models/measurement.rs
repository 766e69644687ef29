//! Ground station measurement model

use super::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One real-world pollutant reading from a ground station
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroundMeasurement {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Measured parameter (e.g. "PM2.5", "NO2")
    pub parameter: String,
    /// Measured value in `unit`
    pub value: f64,
    /// Unit of the value (e.g. "µg/m³", "ppb")
    pub unit: String,
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// State of the station
    pub state: String,
    /// County of the station
    pub county: String,
}

impl GroundMeasurement {
    /// Location of the station
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
