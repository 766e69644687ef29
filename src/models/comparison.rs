//! Forecast evaluation pairs and accuracy statistics

use super::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast joined against the observation it predicted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSample {
    pub predicted: f64,
    pub actual: f64,
    pub timestamp: DateTime<Utc>,
    pub location: GeoPoint,
    pub pollutant: String,
    pub hours_ahead: u32,
}

impl ComparisonSample {
    /// Signed error (positive when the forecast was too high)
    #[must_use]
    pub fn error(&self) -> f64 {
        self.predicted - self.actual
    }
}

/// Aggregate statistics over a set of samples
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Mean signed error
    pub bias: f64,
    /// Number of samples
    pub count: usize,
}
