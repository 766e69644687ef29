//! Geodesy helpers
//!
//! Great-circle distance, flat-earth displacement under a bearing, and the
//! spherical destination-point formula.

use crate::factors::{EARTH_RADIUS_KM, KM_PER_DEGREE};
use crate::models::GeoPoint;
use haversine::{Units, distance};

/// Haversine great-circle distance between two points in kilometers
#[must_use]
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    distance((*from).into(), (*to).into(), Units::Kilometers)
}

/// Bearing the wind travels toward, given the direction it blows from
#[must_use]
pub fn downwind_bearing(wind_direction: f64) -> f64 {
    (wind_direction + 180.0).rem_euclid(360.0)
}

/// Degree offsets `(Δlat, Δlon)` for moving `distance_km` along `bearing_deg`
///
/// Uses the flat-earth approximation with [`KM_PER_DEGREE`]; the longitude
/// offset is scaled by the cosine of `reference_latitude`.
#[must_use]
pub fn displacement_degrees(bearing_deg: f64, distance_km: f64, reference_latitude: f64) -> (f64, f64) {
    let bearing = bearing_deg.to_radians();
    let d_lat = distance_km * bearing.cos() / KM_PER_DEGREE;
    let d_lon = distance_km * bearing.sin() / (KM_PER_DEGREE * reference_latitude.to_radians().cos());
    (d_lat, d_lon)
}

/// Point reached by travelling `distance_km` from `origin` along `bearing_deg`
/// on a spherical Earth
#[must_use]
pub fn destination_point(origin: &GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let angular = distance_km / EARTH_RADIUS_KM;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    // normalise to [-180, 180)
    let longitude = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    GeoPoint::new(lat2.to_degrees(), longitude)
}
