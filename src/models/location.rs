//! Geographic point model

use crate::{AirCastError, Result};
use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point without range checks
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a new point, rejecting out-of-range coordinates
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Check that both coordinates are finite and within range
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AirCastError::validation(format!(
                "Latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AirCastError::validation(format!(
                "Longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Great-circle distance to another point in kilometers
    #[must_use]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        crate::geo::haversine_km(self, other)
    }

    /// Format point as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for haversine::Location {
    fn from(point: GeoPoint) -> Self {
        haversine::Location {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}
