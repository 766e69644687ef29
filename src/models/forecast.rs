//! Forecast result model

use super::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Method that produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    /// Wind advection with fire, washout and bias terms
    Advection,
    /// Most recent observation carried forward
    Persistence,
}

/// Decomposition of an advection forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastComponents {
    /// Surface value derived from the satellite column
    pub base_value: f64,
    /// Summed contribution of nearby fires
    pub fire_contribution: f64,
    /// Multiplicative precipitation removal factor
    pub washout_factor: f64,
    /// Additive ground-truth correction
    pub bias_correction: f64,
}

/// Output of a single forecast call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: GeoPoint,
    /// Forecast parameter (e.g. "PM2.5")
    pub pollutant: String,
    /// Valid time of the forecast
    pub timestamp: DateTime<Utc>,
    pub hours_ahead: u32,
    pub value: f64,
    pub unit: String,
    /// Forecast confidence (0.0-1.0)
    pub confidence: f64,
    pub method: ForecastMethod,
    /// Present for advection forecasts only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub components: Option<ForecastComponents>,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Advection => write!(f, "advection"),
            ForecastMethod::Persistence => write!(f, "persistence"),
        }
    }
}
