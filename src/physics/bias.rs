//! Ground-truth bias correction

use crate::factors::AdvectionFactors;
use crate::models::GroundMeasurement;

/// Additive correction pulling `predicted` toward a recent observation
///
/// Zero without ground truth; otherwise
/// `(ground_truth.value - predicted) × bias_correction_weight`.
#[must_use]
pub fn bias_correction(
    predicted: f64,
    ground_truth: Option<&GroundMeasurement>,
    factors: &AdvectionFactors,
) -> f64 {
    ground_truth.map_or(0.0, |gt| (gt.value - predicted) * factors.bias_correction_weight)
}
