//! `AirCast` - short-horizon air quality forecasting
//!
//! This library turns a satellite pollutant column, local weather, nearby
//! active fires and an optional ground reading into a surface concentration
//! forecast with a confidence, alongside a persistence baseline and the
//! statistics used to validate and compare forecasting methods.
//!
//! Every computation is a pure function of its inputs. Calibration factors
//! are passed explicitly, starting from [`DEFAULT_FACTORS`].

pub mod advection;
pub mod config;
pub mod error;
pub mod factors;
pub mod forecast;
pub mod geo;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod physics;

// Re-export core types for public API
pub use crate::config::AirCastConfig;
pub use error::AirCastError;
pub use factors::{AdvectionFactors, DEFAULT_FACTORS};
pub use forecast::ForecastEngine;
pub use metrics::{BetterModel, ModelComparison};
pub use models::{
    AdvectionGrid, ComparisonSample, Fire, ForecastComponents, ForecastMethod, ForecastResult,
    GeoPoint, GridBounds, GridCell, GridField, GroundMeasurement, ValidationMetrics,
    WeatherConditions,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirCastError>;
