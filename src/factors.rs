//! Calibration factors and empirical constants
//!
//! Every physical computation takes an [`AdvectionFactors`] explicitly. The
//! calibrated default set ships as [`DEFAULT_FACTORS`] so forecasts are
//! reproducible without recalibration.

use crate::{AirCastError, Result};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle math, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of latitude, in kilometers
pub const KM_PER_DEGREE: f64 = 111.0;

/// Column density (molecules/cm²) that maps to roughly 1 ppb at the surface
pub const MOLECULES_PER_PPB: f64 = 1e15;

/// Empirical scaling from the gas-phase surrogate to particulate concentration
pub const PM_SURROGATE_SCALING: f64 = 10.0;

/// Conversion factor from m/s to km/h
pub const MS_TO_KMH: f64 = 3.6;

/// Distance offset for inverse-distance weighting, in kilometers
pub const IDW_EPSILON_KM: f64 = 0.001;

/// Number of neighbouring cells blended by spatial interpolation
pub const INTERPOLATION_NEIGHBOURS: usize = 4;

/// Fires closer than this are treated as being at this distance, in kilometers
pub const MIN_FIRE_DISTANCE_KM: f64 = 0.1;

/// Tunable coefficients for the advection forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvectionFactors {
    /// NO2 column to surface concentration ratio
    #[serde(default = "default_column_to_surface")]
    pub column_to_surface: f64,
    /// Gas-phase surrogate to particulate (PM) ratio
    #[serde(default = "default_pm_index_to_surface")]
    pub pm_index_to_surface: f64,
    /// Reference planetary boundary layer height in meters
    #[serde(default = "default_pbl_reference")]
    pub pbl_reference: f64,
    /// Scaling applied to fire radiative power (MW)
    #[serde(default = "default_fire_frp_scaling")]
    pub fire_frp_scaling: f64,
    /// Exponent of the fire distance decay
    #[serde(default = "default_fire_distance_decay")]
    pub fire_distance_decay: f64,
    /// Precipitation washout rate per mm
    #[serde(default = "default_washout_rate")]
    pub washout_rate: f64,
    /// Weight of the ground-truth correction (0 disables it)
    #[serde(default = "default_bias_correction_weight")]
    pub bias_correction_weight: f64,
}

/// Calibrated default factors
pub const DEFAULT_FACTORS: AdvectionFactors = AdvectionFactors {
    column_to_surface: 1.87,
    pm_index_to_surface: 0.1,
    pbl_reference: 800.0,
    fire_frp_scaling: 1.0,
    fire_distance_decay: 2.5,
    washout_rate: 0.2,
    bias_correction_weight: 0.0,
};

fn default_column_to_surface() -> f64 {
    DEFAULT_FACTORS.column_to_surface
}

fn default_pm_index_to_surface() -> f64 {
    DEFAULT_FACTORS.pm_index_to_surface
}

fn default_pbl_reference() -> f64 {
    DEFAULT_FACTORS.pbl_reference
}

fn default_fire_frp_scaling() -> f64 {
    DEFAULT_FACTORS.fire_frp_scaling
}

fn default_fire_distance_decay() -> f64 {
    DEFAULT_FACTORS.fire_distance_decay
}

fn default_washout_rate() -> f64 {
    DEFAULT_FACTORS.washout_rate
}

fn default_bias_correction_weight() -> f64 {
    DEFAULT_FACTORS.bias_correction_weight
}

impl Default for AdvectionFactors {
    fn default() -> Self {
        DEFAULT_FACTORS
    }
}

impl AdvectionFactors {
    /// Copy of these factors with a different bias correction weight
    #[must_use]
    pub fn with_bias_correction_weight(mut self, weight: f64) -> Self {
        self.bias_correction_weight = weight;
        self
    }

    /// Reject factor sets that make the physics meaningless
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("column_to_surface", self.column_to_surface),
            ("pm_index_to_surface", self.pm_index_to_surface),
            ("pbl_reference", self.pbl_reference),
            ("fire_frp_scaling", self.fire_frp_scaling),
            ("fire_distance_decay", self.fire_distance_decay),
            ("washout_rate", self.washout_rate),
            ("bias_correction_weight", self.bias_correction_weight),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(AirCastError::validation(format!(
                    "Factor '{name}' must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.pbl_reference == 0.0 {
            return Err(AirCastError::validation(
                "Factor 'pbl_reference' must be greater than zero",
            ));
        }

        if self.bias_correction_weight > 1.0 {
            return Err(AirCastError::validation(
                "Factor 'bias_correction_weight' cannot exceed 1.0",
            ));
        }

        Ok(())
    }
}
