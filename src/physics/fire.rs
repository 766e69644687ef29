//! Fire impact estimator

use crate::factors::{AdvectionFactors, MIN_FIRE_DISTANCE_KM};
use crate::models::{Fire, GeoPoint};

/// Summed contribution of active fires to surface particulates at `location`
///
/// Each fire adds `frp × fire_frp_scaling / distance^fire_distance_decay`,
/// with the distance floored at [`MIN_FIRE_DISTANCE_KM`]. Contributions
/// superpose linearly.
#[must_use]
pub fn fire_impact(fires: &[Fire], location: &GeoPoint, factors: &AdvectionFactors) -> f64 {
    fires
        .iter()
        .map(|fire| {
            let distance = location.distance_to(&fire.location()).max(MIN_FIRE_DISTANCE_KM);
            fire.frp * factors.fire_frp_scaling / distance.powf(factors.fire_distance_decay)
        })
        .sum()
}
