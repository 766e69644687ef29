//! Data models for the `AirCast` library
//!
//! This module contains the domain models organized by concern:
//! - Location: geographic points
//! - Weather: point-in-time weather samples
//! - Fire: active fire detections
//! - Measurement: ground station readings
//! - Grid: gridded pollutant fields
//! - Forecast: forecast results and their decomposition
//! - Comparison: forecast/observation pairs and accuracy statistics

pub mod comparison;
pub mod fire;
pub mod forecast;
pub mod grid;
pub mod location;
pub mod measurement;
pub mod weather;

// Re-export all public types for convenient access
pub use comparison::{ComparisonSample, ValidationMetrics};
pub use fire::Fire;
pub use forecast::{ForecastComponents, ForecastMethod, ForecastResult};
pub use grid::{AdvectionGrid, GridBounds, GridCell, GridField};
pub use location::GeoPoint;
pub use measurement::GroundMeasurement;
pub use weather::WeatherConditions;
