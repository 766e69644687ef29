//! Grid advection and spatial interpolation
//!
//! A single wind vector moves the whole grid rigidly (frozen-field advection,
//! no diffusion). Interpolation blends the nearest valued cells by inverse
//! distance weighting.

use crate::factors::{IDW_EPSILON_KM, INTERPOLATION_NEIGHBOURS};
use crate::geo::{destination_point, displacement_degrees, downwind_bearing, haversine_km};
use crate::models::{AdvectionGrid, GeoPoint, GridCell, GridField, WeatherConditions};
use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Translate every cell of `grid` with the wind for `hours`
///
/// Cells move toward the downwind direction by `wind_speed × 3.6 × hours` km.
/// The longitude offset uses the first cell's latitude for the whole grid.
/// Cell values and `bounds` are left unchanged; the timestamp advances by
/// `hours`.
#[must_use]
pub fn advect(grid: &AdvectionGrid, weather: &WeatherConditions, hours: f64) -> AdvectionGrid {
    let distance_km = weather.wind_speed_kmh() * hours;
    let bearing = downwind_bearing(weather.wind_direction);
    let reference_latitude = grid.cells.first().map_or(0.0, |c| c.latitude);
    let (d_lat, d_lon) = displacement_degrees(bearing, distance_km, reference_latitude);

    debug!(
        "Advecting {} cells {:.2} km toward {:.0}° (Δlat {:.5}, Δlon {:.5})",
        grid.cells.len(),
        distance_km,
        bearing,
        d_lat,
        d_lon
    );

    let cells = grid
        .cells
        .iter()
        .map(|cell| GridCell {
            latitude: cell.latitude + d_lat,
            longitude: cell.longitude + d_lon,
            ..cell.clone()
        })
        .collect();

    AdvectionGrid {
        cells,
        bounds: grid.bounds,
        resolution: grid.resolution,
        timestamp: shift_timestamp(grid.timestamp, hours),
    }
}

/// Inverse-distance-weighted value of `field` at `point`
///
/// Uses the [`INTERPOLATION_NEIGHBOURS`] nearest cells that carry a value.
/// Returns `None` when no cell carries one.
#[must_use]
pub fn interpolate(grid: &AdvectionGrid, point: &GeoPoint, field: GridField) -> Option<f64> {
    let mut neighbours: Vec<(f64, f64)> = grid
        .cells
        .iter()
        .filter_map(|cell| {
            cell.value(field)
                .map(|value| (haversine_km(point, &cell.location()), value))
        })
        .collect();

    if neighbours.is_empty() {
        return None;
    }

    // stable sort keeps the cell order for ties
    neighbours.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    neighbours.truncate(INTERPOLATION_NEIGHBOURS);

    let (weighted_sum, weight_total) =
        neighbours
            .iter()
            .fold((0.0, 0.0), |(sum, total), &(distance, value)| {
                let weight = 1.0 / (distance + IDW_EPSILON_KM);
                (sum + weight * value, total + weight)
            });

    Some(weighted_sum / weight_total)
}

/// Cell closest to `point`, regardless of its values
#[must_use]
pub fn nearest_cell<'a>(grid: &'a AdvectionGrid, point: &GeoPoint) -> Option<&'a GridCell> {
    grid.cells.iter().min_by(|a, b| {
        haversine_km(point, &a.location())
            .partial_cmp(&haversine_km(point, &b.location()))
            .unwrap_or(Ordering::Equal)
    })
}

/// Cells within `radius_km` of `center`
#[must_use]
pub fn cells_within_radius<'a>(
    grid: &'a AdvectionGrid,
    center: &GeoPoint,
    radius_km: f64,
) -> Vec<&'a GridCell> {
    grid.cells
        .iter()
        .filter(|cell| haversine_km(center, &cell.location()) <= radius_km)
        .collect()
}

/// Cells around the point `distance_km` upwind of `center`
///
/// Upwind is the direction the wind blows from, so these cells hold the air
/// that will reach `center`.
#[must_use]
pub fn upwind_cells<'a>(
    grid: &'a AdvectionGrid,
    center: &GeoPoint,
    wind_direction: f64,
    distance_km: f64,
    search_radius_km: f64,
) -> Vec<&'a GridCell> {
    let upwind = destination_point(center, wind_direction, distance_km);
    cells_within_radius(grid, &upwind, search_radius_km)
}

/// Cells around the point `distance_km` downwind of `center`
#[must_use]
pub fn downwind_cells<'a>(
    grid: &'a AdvectionGrid,
    center: &GeoPoint,
    wind_direction: f64,
    distance_km: f64,
    search_radius_km: f64,
) -> Vec<&'a GridCell> {
    let downwind = destination_point(center, downwind_bearing(wind_direction), distance_km);
    cells_within_radius(grid, &downwind, search_radius_km)
}

/// Move `timestamp` by `hours`, saturating at the representable range
///
/// A NaN offset leaves the timestamp unchanged.
pub(crate) fn shift_timestamp(timestamp: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    if hours.is_nan() {
        warn!("Offset of NaN hours, keeping {}", timestamp);
        return timestamp;
    }

    Duration::try_milliseconds((hours * 3_600_000.0).round() as i64)
        .and_then(|offset| timestamp.checked_add_signed(offset))
        .unwrap_or_else(|| {
            warn!("Offset of {}h leaves the representable time range, saturating", hours);
            if hours > 0.0 {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            }
        })
}
