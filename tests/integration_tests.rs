//! Integration tests for the AirCast forecasting API

use aircast::advection::{advect, interpolate};
use aircast::forecast::{advection_confidence, persistence_confidence};
use aircast::geo::destination_point;
use aircast::metrics::{
    calculate_bias, calculate_mae, calculate_metrics, calculate_rmse, compare_models, skill_score,
};
use aircast::physics::{column_to_surface, fire_impact, washout};
use aircast::{
    AdvectionFactors, AdvectionGrid, BetterModel, ComparisonSample, DEFAULT_FACTORS, Fire,
    ForecastEngine, ForecastMethod, GeoPoint, GridCell, GridField, GroundMeasurement,
    WeatherConditions,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};

const LOS_ANGELES: GeoPoint = GeoPoint {
    latitude: 34.0522,
    longitude: -118.2437,
};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 10, 12, 0, 0).unwrap()
}

#[fixture]
fn weather() -> WeatherConditions {
    WeatherConditions {
        wind_speed: 3.5,
        wind_direction: 250.0,
        pbl_height: 650.0,
        temperature: 29.0,
        precipitation: 0.0,
        timestamp: noon(),
    }
}

#[fixture]
fn ground_truth() -> GroundMeasurement {
    GroundMeasurement {
        latitude: LOS_ANGELES.latitude,
        longitude: LOS_ANGELES.longitude,
        parameter: "PM2.5".to_string(),
        value: 35.2,
        unit: "µg/m³".to_string(),
        timestamp: noon(),
        state: "California".to_string(),
        county: "Los Angeles".to_string(),
    }
}

fn fire_at(bearing: f64, distance_km: f64, frp: f64) -> Fire {
    let point = destination_point(&LOS_ANGELES, bearing, distance_km);
    Fire {
        latitude: point.latitude,
        longitude: point.longitude,
        brightness: 352.1,
        frp,
        confidence: "h".to_string(),
        acq_date: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
        acq_time: "1042".to_string(),
        satellite: "N".to_string(),
    }
}

fn sample(predicted: f64, actual: f64) -> ComparisonSample {
    ComparisonSample {
        predicted,
        actual,
        timestamp: noon(),
        location: LOS_ANGELES,
        pollutant: "PM2.5".to_string(),
        hours_ahead: 1,
    }
}

#[rstest]
#[case(0.0)]
#[case(-2.5)]
#[case(-100.0)]
fn test_washout_is_identity_without_rain(#[case] precipitation: f64) {
    assert_eq!(washout(precipitation, &DEFAULT_FACTORS), 1.0);
}

#[rstest]
#[case(0.1, 0.2)]
#[case(1.0, 2.0)]
#[case(5.0, 25.0)]
fn test_washout_decreases_with_rain(#[case] lighter: f64, #[case] heavier: f64) {
    assert!(washout(lighter, &DEFAULT_FACTORS) > washout(heavier, &DEFAULT_FACTORS));
}

#[rstest]
#[case(200.0, 400.0)]
#[case(800.0, 801.0)]
#[case(1500.0, 3000.0)]
fn test_deeper_boundary_layer_dilutes(#[case] shallow: f64, #[case] deep: f64) {
    let column = 8e15;
    assert!(
        column_to_surface(column, shallow, &DEFAULT_FACTORS)
            > column_to_surface(column, deep, &DEFAULT_FACTORS)
    );
}

#[rstest]
fn test_fire_impact_falls_with_distance_and_grows_with_count() {
    let near = fire_at(90.0, 2.0, 80.0);
    let far = fire_at(90.0, 20.0, 80.0);
    let near_impact = fire_impact(std::slice::from_ref(&near), &LOS_ANGELES, &DEFAULT_FACTORS);
    let far_impact = fire_impact(std::slice::from_ref(&far), &LOS_ANGELES, &DEFAULT_FACTORS);
    assert!(near_impact > far_impact);

    let both = fire_impact(&[near, far], &LOS_ANGELES, &DEFAULT_FACTORS);
    assert!(both >= near_impact);
}

#[rstest]
fn test_fire_raises_advection_forecast(weather: WeatherConditions) {
    let engine = ForecastEngine::default();
    let clean = engine.forecast_advection(&LOS_ANGELES, 6e15, &weather, &[], None, 2);
    let smoky = engine.forecast_advection(
        &LOS_ANGELES,
        6e15,
        &weather,
        &[fire_at(300.0, 4.0, 250.0)],
        None,
        2,
    );

    assert!(smoky.value >= clean.value);
    assert!(smoky.components.unwrap().fire_contribution > 0.0);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(12)]
#[case(96)]
fn test_persistence_returns_ground_truth(ground_truth: GroundMeasurement, #[case] hours: u32) {
    let engine = ForecastEngine::default();
    let result = engine.forecast_persistence(&LOS_ANGELES, &ground_truth, hours);
    assert_eq!(result.value, ground_truth.value);
    assert_eq!(result.unit, ground_truth.unit);
    assert_eq!(result.method, ForecastMethod::Persistence);
    assert!(result.components.is_none());
    assert!((0.2..=0.8).contains(&result.confidence));
}

#[rstest]
fn test_confidence_never_increases_with_horizon() {
    for hours in 0..72 {
        assert!(advection_confidence(hours + 1) <= advection_confidence(hours));
        assert!(persistence_confidence(hours + 1) <= persistence_confidence(hours));
        assert!((0.3..=0.9).contains(&advection_confidence(hours)));
        assert!((0.2..=0.8).contains(&persistence_confidence(hours)));
    }
}

#[rstest]
fn test_reference_metrics() {
    let samples = vec![sample(25.0, 23.0), sample(30.0, 32.0), sample(20.0, 19.0)];
    assert!((calculate_mae(&samples) - 1.67).abs() < 0.01);
    assert!((calculate_rmse(&samples) - 1.73).abs() < 0.01);
    assert!((calculate_bias(&samples) - 0.33).abs() < 0.01);
    assert_eq!(calculate_mae(&[]), 0.0);
    assert_eq!(calculate_rmse(&[]), 0.0);
    assert_eq!(calculate_bias(&[]), 0.0);
}

#[rstest]
fn test_compare_models_declares_winner_and_tie() {
    let worse = calculate_metrics(&[sample(30.0, 20.0), sample(10.0, 25.0), sample(22.0, 18.0)]);
    let better = calculate_metrics(&[sample(21.0, 20.0), sample(24.0, 25.0), sample(18.5, 18.0)]);

    assert_eq!(compare_models(&worse, &better).better_model, BetterModel::Model2);
    assert_eq!(compare_models(&better, &worse).better_model, BetterModel::Model1);
    assert_eq!(compare_models(&better, &better).better_model, BetterModel::Tie);
    assert!(skill_score(&better, &worse) > 0.0);
}

#[rstest]
fn test_east_wind_moves_grid_west() {
    let cells = vec![
        GridCell::with_column(34.0, -118.3, 1.2e16),
        GridCell::with_column(34.0, -118.2, 1.4e16),
        GridCell::with_column(34.1, -118.3, 1.1e16),
        GridCell::with_column(34.1, -118.2, 1.3e16),
    ];
    let grid = AdvectionGrid::from_cells(cells, 0.1, noon());
    let east_wind = WeatherConditions {
        wind_direction: 90.0,
        wind_speed: 6.0,
        ..weather()
    };

    let moved = advect(&grid, &east_wind, 2.0);
    for (before, after) in grid.cells.iter().zip(&moved.cells) {
        assert!(after.longitude < before.longitude);
        assert!((after.latitude - before.latitude).abs() < 1e-6);
    }
    assert_eq!(moved.timestamp, noon() + Duration::hours(2));

    let mut refreshed = moved.clone();
    refreshed.recompute_bounds();
    assert!(refreshed.cells_within_bounds());
    assert!(refreshed.bounds.east < grid.bounds.east);
}

/// Grid -> advection -> interpolation -> forecast, then score it against
/// persistence on the same observations.
#[rstest]
fn test_end_to_end_forecast_and_validation(weather: WeatherConditions, ground_truth: GroundMeasurement) {
    let factors = AdvectionFactors::default().with_bias_correction_weight(0.3);
    let engine = ForecastEngine::new(factors);

    let cells: Vec<GridCell> = (0..9)
        .flat_map(|i| {
            (0..9).map(move |j| {
                GridCell::with_column(
                    33.85 + f64::from(i) * 0.05,
                    -118.45 + f64::from(j) * 0.05,
                    5e15 + f64::from(i + j) * 5e14,
                )
            })
        })
        .collect();
    let grid = AdvectionGrid::from_cells(cells, 0.05, noon());
    assert!(interpolate(&grid, &LOS_ANGELES, GridField::ColumnDensity).is_some());

    let fires = [fire_at(200.0, 12.0, 140.0)];
    let advection: Vec<_> = (1..=6)
        .filter_map(|h| {
            engine.forecast_from_grid(&grid, &LOS_ANGELES, &weather, &fires, Some(&ground_truth), h)
        })
        .collect();
    assert_eq!(advection.len(), 6);
    for (h, result) in advection.iter().enumerate() {
        assert_eq!(result.method, ForecastMethod::Advection);
        assert!(result.value >= 0.0);
        assert_eq!(result.hours_ahead as usize, h + 1);
        assert!(result.components.unwrap().bias_correction != 0.0);
    }

    let observed = [33.0, 31.5, 30.2, 29.8, 28.0, 27.1];
    let advection_samples: Vec<_> = advection
        .iter()
        .zip(observed)
        .map(|(r, actual)| sample(r.value, actual))
        .collect();
    let persistence_samples: Vec<_> = (1..=6)
        .zip(observed)
        .map(|(h, actual)| {
            let r = engine.forecast_persistence(&LOS_ANGELES, &ground_truth, h);
            sample(r.value, actual)
        })
        .collect();

    let advection_metrics = calculate_metrics(&advection_samples);
    let persistence_metrics = calculate_metrics(&persistence_samples);
    assert_eq!(advection_metrics.count, 6);
    assert_eq!(persistence_metrics.count, 6);
    assert!(persistence_metrics.bias > 0.0);

    let comparison = compare_models(&persistence_metrics, &advection_metrics);
    assert!(comparison.model1_wins + comparison.model2_wins <= 3);
}

#[rstest]
fn test_forecast_results_serialize_with_method_names(
    weather: WeatherConditions,
    ground_truth: GroundMeasurement,
) {
    let engine = ForecastEngine::default();
    let advection = engine.forecast_advection(&LOS_ANGELES, 1e16, &weather, &[], None, 1);
    let persistence = engine.forecast_persistence(&LOS_ANGELES, &ground_truth, 1);

    let adv_json = serde_json::to_value(&advection).unwrap();
    assert_eq!(adv_json["method"], "advection");
    assert!(adv_json["components"]["washout_factor"].is_number());

    let per_json = serde_json::to_value(&persistence).unwrap();
    assert_eq!(per_json["method"], "persistence");
    assert!(per_json.get("components").is_none());
}

#[rstest]
fn test_checked_forecast_rejects_invalid_location(weather: WeatherConditions) {
    let engine = ForecastEngine::default();
    let result =
        engine.forecast_advection_checked(&GeoPoint::new(12.0, 200.0), 1e16, &weather, &[], None, 1);
    assert!(result.unwrap_err().user_message().contains("Longitude"));
}

#[rstest]
#[case(u32::MAX)]
#[case(3_000_000_000)]
fn test_far_horizons_saturate_instead_of_panicking(
    weather: WeatherConditions,
    ground_truth: GroundMeasurement,
    #[case] hours: u32,
) {
    let engine = ForecastEngine::default();
    let advection = engine.forecast_advection(&LOS_ANGELES, 1e16, &weather, &[], None, hours);
    let persistence = engine.forecast_persistence(&LOS_ANGELES, &ground_truth, hours);

    assert_eq!(advection.timestamp, DateTime::<Utc>::MAX_UTC);
    assert_eq!(persistence.timestamp, DateTime::<Utc>::MAX_UTC);
    assert_eq!(persistence.value, ground_truth.value);
}
