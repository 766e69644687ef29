//! Forecast engine
//!
//! Combines the column conversion, fire, washout and bias terms into a
//! single advection forecast, and provides the persistence baseline used to
//! judge it.

use crate::advection::{advect, interpolate, shift_timestamp};
use crate::config::AirCastConfig;
use crate::factors::{AdvectionFactors, PM_SURROGATE_SCALING};
use crate::models::{
    AdvectionGrid, Fire, ForecastComponents, ForecastMethod, ForecastResult, GeoPoint, GridField,
    GroundMeasurement, WeatherConditions,
};
use crate::physics::{bias_correction, column_to_surface, fire_impact, washout};
use crate::{AirCastError, Result};
use tracing::{debug, instrument, warn};

/// Parameter name of advection forecasts
pub const ADVECTION_POLLUTANT: &str = "PM2.5";

/// Unit of advection forecasts
pub const ADVECTION_UNIT: &str = "µg/m³";

/// Default longest horizon accepted by the checked entry points
pub const DEFAULT_MAX_HOURS_AHEAD: u32 = 24;

/// Horizon used when the caller does not pick one
pub const DEFAULT_HOURS_AHEAD: u32 = 1;

/// Confidence of an advection forecast `hours_ahead` hours out, in [0.3, 0.9]
#[must_use]
pub fn advection_confidence(hours_ahead: u32) -> f64 {
    (0.9 - f64::from(hours_ahead) * 0.05).max(0.3)
}

/// Confidence of a persistence forecast `hours_ahead` hours out, in [0.2, 0.8]
#[must_use]
pub fn persistence_confidence(hours_ahead: u32) -> f64 {
    (0.8 - f64::from(hours_ahead) * 0.08).max(0.2)
}

/// Stateless forecast engine bound to one set of calibration factors
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEngine {
    factors: AdvectionFactors,
    max_hours_ahead: u32,
    default_hours_ahead: u32,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(AdvectionFactors::default())
    }
}

impl ForecastEngine {
    /// Create an engine using the given factors
    #[must_use]
    pub fn new(factors: AdvectionFactors) -> Self {
        Self {
            factors,
            max_hours_ahead: DEFAULT_MAX_HOURS_AHEAD,
            default_hours_ahead: DEFAULT_HOURS_AHEAD,
        }
    }

    /// Create an engine from loaded configuration
    #[must_use]
    pub fn from_config(config: &AirCastConfig) -> Self {
        Self {
            factors: config.factors,
            max_hours_ahead: config.forecast.max_hours_ahead,
            default_hours_ahead: config.forecast.default_hours_ahead,
        }
    }

    /// Calibration factors used by this engine
    #[must_use]
    pub fn factors(&self) -> &AdvectionFactors {
        &self.factors
    }

    /// Longest horizon accepted by the checked entry points
    #[must_use]
    pub fn max_hours_ahead(&self) -> u32 {
        self.max_hours_ahead
    }

    /// Horizon used by [`ForecastEngine::forecast_advection_default`]
    #[must_use]
    pub fn default_hours_ahead(&self) -> u32 {
        self.default_hours_ahead
    }

    /// Advection forecast at `location` from a satellite column density
    ///
    /// The surface estimate is scaled to particulates, fire contributions are
    /// added, the sum is reduced by washout, the bias correction is added and
    /// the result is floored at zero. Inputs are not validated; degenerate
    /// numbers propagate. See [`ForecastEngine::forecast_advection_checked`].
    #[instrument(level = "debug", skip(self, weather, fires, ground_truth), fields(fires = fires.len()))]
    pub fn forecast_advection(
        &self,
        location: &GeoPoint,
        column_density: f64,
        weather: &WeatherConditions,
        fires: &[Fire],
        ground_truth: Option<&GroundMeasurement>,
        hours_ahead: u32,
    ) -> ForecastResult {
        let factors = &self.factors;

        let surface = column_to_surface(column_density, weather.pbl_height, factors);
        let fire_contribution = fire_impact(fires, location, factors);
        let washout_factor = washout(weather.precipitation, factors);
        let base_value = surface * factors.pm_index_to_surface * PM_SURROGATE_SCALING;
        let correction = bias_correction(base_value, ground_truth, factors);

        // floor applies after the correction
        let value = ((base_value + fire_contribution) * washout_factor + correction).max(0.0);

        debug!(
            "{} +{}h: base {:.3}, fires {:.3}, washout {:.3}, correction {:.3} -> {:.3}",
            location.format_coordinates(),
            hours_ahead,
            base_value,
            fire_contribution,
            washout_factor,
            correction,
            value
        );

        ForecastResult {
            location: *location,
            pollutant: ADVECTION_POLLUTANT.to_string(),
            timestamp: shift_timestamp(weather.timestamp, f64::from(hours_ahead)),
            hours_ahead,
            value,
            unit: ADVECTION_UNIT.to_string(),
            confidence: advection_confidence(hours_ahead),
            method: ForecastMethod::Advection,
            components: Some(ForecastComponents {
                base_value,
                fire_contribution,
                washout_factor,
                bias_correction: correction,
            }),
        }
    }

    /// Advection forecast at the engine's default horizon
    pub fn forecast_advection_default(
        &self,
        location: &GeoPoint,
        column_density: f64,
        weather: &WeatherConditions,
        fires: &[Fire],
        ground_truth: Option<&GroundMeasurement>,
    ) -> ForecastResult {
        self.forecast_advection(
            location,
            column_density,
            weather,
            fires,
            ground_truth,
            self.default_hours_ahead,
        )
    }

    /// Validate every input, then run [`ForecastEngine::forecast_advection`]
    pub fn forecast_advection_checked(
        &self,
        location: &GeoPoint,
        column_density: f64,
        weather: &WeatherConditions,
        fires: &[Fire],
        ground_truth: Option<&GroundMeasurement>,
        hours_ahead: u32,
    ) -> Result<ForecastResult> {
        self.factors.validate()?;
        location.validate()?;
        weather.validate()?;

        if !column_density.is_finite() || column_density < 0.0 {
            return Err(AirCastError::validation(format!(
                "Column density must be a finite non-negative value, got {column_density}"
            )));
        }

        if hours_ahead > self.max_hours_ahead {
            return Err(AirCastError::validation(format!(
                "Forecast horizon {hours_ahead}h exceeds the maximum of {}h",
                self.max_hours_ahead
            )));
        }

        for fire in fires {
            fire.validate()?;
        }

        if let Some(gt) = ground_truth {
            if !gt.value.is_finite() {
                return Err(AirCastError::validation(
                    "Ground truth value must be finite",
                ));
            }
        }

        Ok(self.forecast_advection(
            location,
            column_density,
            weather,
            fires,
            ground_truth,
            hours_ahead,
        ))
    }

    /// Persistence baseline: the latest observation carried forward unchanged
    ///
    /// The valid time is the observation time plus `hours_ahead`.
    #[must_use]
    pub fn forecast_persistence(
        &self,
        location: &GeoPoint,
        ground_truth: &GroundMeasurement,
        hours_ahead: u32,
    ) -> ForecastResult {
        ForecastResult {
            location: *location,
            pollutant: ground_truth.parameter.clone(),
            timestamp: shift_timestamp(ground_truth.timestamp, f64::from(hours_ahead)),
            hours_ahead,
            value: ground_truth.value,
            unit: ground_truth.unit.clone(),
            confidence: persistence_confidence(hours_ahead),
            method: ForecastMethod::Persistence,
            components: None,
        }
    }

    /// One advection forecast per hour from 1 to `max_hours`
    ///
    /// The horizon is capped at the engine's maximum.
    pub fn forecast_series(
        &self,
        location: &GeoPoint,
        column_density: f64,
        weather: &WeatherConditions,
        fires: &[Fire],
        ground_truth: Option<&GroundMeasurement>,
        max_hours: u32,
    ) -> Vec<ForecastResult> {
        if max_hours > self.max_hours_ahead {
            warn!(
                "Requested {}h series, capping at {}h",
                max_hours, self.max_hours_ahead
            );
        }
        let horizon = max_hours.min(self.max_hours_ahead);

        (1..=horizon)
            .map(|hours| {
                self.forecast_advection(
                    location,
                    column_density,
                    weather,
                    fires,
                    ground_truth,
                    hours,
                )
            })
            .collect()
    }

    /// Advect a column grid `hours_ahead` hours and forecast at `location`
    ///
    /// Returns `None` when no cell of the grid carries a column density.
    #[instrument(level = "debug", skip(self, grid, weather, fires, ground_truth))]
    pub fn forecast_from_grid(
        &self,
        grid: &AdvectionGrid,
        location: &GeoPoint,
        weather: &WeatherConditions,
        fires: &[Fire],
        ground_truth: Option<&GroundMeasurement>,
        hours_ahead: u32,
    ) -> Option<ForecastResult> {
        let advected = advect(grid, weather, f64::from(hours_ahead));
        let Some(column_density) = interpolate(&advected, location, GridField::ColumnDensity) else {
            warn!("Grid has no column densities to interpolate from");
            return None;
        };
        debug!("Interpolated column density {:.3e}", column_density);

        Some(self.forecast_advection(
            location,
            column_density,
            weather,
            fires,
            ground_truth,
            hours_ahead,
        ))
    }
}
