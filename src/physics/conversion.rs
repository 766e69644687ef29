//! Column-to-surface conversion

use crate::factors::{AdvectionFactors, MOLECULES_PER_PPB};

/// Estimate near-surface concentration (≈ppb) from a vertical column density
///
/// `surface = column × column_to_surface × (pbl_reference / pbl_height) / 1e15`.
/// A deeper boundary layer dilutes the same column, so the result strictly
/// decreases as `pbl_height` grows. Inputs are not validated.
#[must_use]
pub fn column_to_surface(column_density: f64, pbl_height: f64, factors: &AdvectionFactors) -> f64 {
    let pbl_factor = factors.pbl_reference / pbl_height;
    column_density * factors.column_to_surface * pbl_factor / MOLECULES_PER_PPB
}
