//! Precipitation washout

use crate::factors::AdvectionFactors;

/// Multiplicative removal factor in (0, 1] for `precipitation` mm
///
/// Exactly 1.0 without rain, otherwise `exp(-precipitation × washout_rate)`.
#[must_use]
pub fn washout(precipitation: f64, factors: &AdvectionFactors) -> f64 {
    if precipitation <= 0.0 {
        return 1.0;
    }
    (-precipitation * factors.washout_rate).exp()
}
