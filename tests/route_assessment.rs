/// Integration tests for route risk assessment
///
/// Tests verify, through the public API only:
/// 1. Reproducibility of simulated weather for a fixed seed and call order
/// 2. Biased vs unbiased simulation ranges
/// 3. Boundary defaulting of forecast day counts
/// 4. Route-level scoring bounds and waypoint annotation
///
/// Run with: cargo test --test route_assessment

use chrono::{DateTime, TimeZone, Utc};
use floodroute_service::risk::{flood_risk, risk_description, MAX_RISK_LEVEL};
use floodroute_service::{
    ConditionCategory, Coordinate, DeliveryRoute, EngineError, FloodRiskService, Waypoint, WeatherSimulator,
    WeatherSource,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SEATTLE: Coordinate = Coordinate { latitude: 47.6062, longitude: -122.3321 };

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 8, 30, 0).unwrap()
}

fn service(seed: u64) -> FloodRiskService<WeatherSimulator> {
    FloodRiskService::new(WeatherSimulator::new(seed).with_fixed_clock(fixed_now()))
}

fn ballard_to_fremont() -> DeliveryRoute {
    let mut route = DeliveryRoute::new(
        "route2",
        "Ballard to Fremont",
        vec![
            Waypoint::new(47.6698, -122.3845, 0).named("Ballard", "Starting point"),
            Waypoint::new(47.6605, -122.3730, 1),
            Waypoint::new(47.6515, -122.3590, 2),
            Waypoint::new(47.6470, -122.3480, 3).named("Fremont", "Destination point"),
        ],
    );
    route.supplier = "Northgate Farms".to_string();
    route
}

// ---------------------------------------------------------------------------
// 1. Reproducibility
// ---------------------------------------------------------------------------

#[test]
fn test_two_runs_with_same_seed_match() {
    let coordinates = [SEATTLE, Coordinate::new(0.0, 0.0), Coordinate::new(40.69, -89.59)];

    let run = || {
        let sim = WeatherSimulator::new(42).with_fixed_clock(fixed_now());
        coordinates
            .iter()
            .map(|&c| (sim.current_weather(c), sim.forecast(c, 3)))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run(), "same seed and call sequence must reproduce");
}

#[test]
fn test_route_assessment_reproducible_for_same_seed() {
    let mut first = ballard_to_fremont();
    let mut second = ballard_to_fremont();
    let a = service(2024).assess_route(&mut first).unwrap();
    let b = service(2024).assess_route(&mut second).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.waypoints, second.waypoints);
}

// ---------------------------------------------------------------------------
// 2. Regional bias
// ---------------------------------------------------------------------------

#[test]
fn test_seattle_current_conditions_are_wet() {
    let svc = service(42);
    for _ in 0..100 {
        let current = svc.current_weather(SEATTLE.latitude, SEATTLE.longitude).unwrap();
        assert!(
            matches!(current.conditions, ConditionCategory::LightRain | ConditionCategory::HeavyRain),
            "Seattle should only simulate rain, got {}",
            current.conditions
        );
        assert!((0.5..=2.5).contains(&current.recent_rainfall_in));
    }
}

#[test]
fn test_null_island_recent_rainfall_under_an_inch() {
    let svc = service(42);
    for _ in 0..100 {
        let current = svc.current_weather(0.0, 0.0).unwrap();
        assert!(current.recent_rainfall_in >= 0.0 && current.recent_rainfall_in < 1.0);
    }
}

// ---------------------------------------------------------------------------
// 3. Boundary defaulting
// ---------------------------------------------------------------------------

#[test]
fn test_out_of_range_day_counts_default_to_five() {
    let svc = service(42);
    assert_eq!(svc.forecast(47.6, -122.3, 10).unwrap().len(), 5);
    assert_eq!(svc.forecast(47.6, -122.3, 0).unwrap().len(), 5);
    assert_eq!(svc.forecast(47.6, -122.3, 7).unwrap().len(), 7);
    assert_eq!(svc.forecast(47.6, -122.3, 1).unwrap().len(), 1);
}

#[test]
fn test_forecast_days_start_today() {
    let forecast = service(42).forecast(47.6, -122.3, 3).unwrap();
    assert_eq!(forecast[0].date, fixed_now().date_naive());
    assert!(forecast.windows(2).all(|w| w[0].date < w[1].date));
}

// ---------------------------------------------------------------------------
// 4. Route scoring
// ---------------------------------------------------------------------------

#[test]
fn test_route_assessment_annotates_waypoints() {
    let mut route = ballard_to_fremont();
    let assessment = service(42).assess_route(&mut route).unwrap();

    assert!(assessment.overall_risk <= MAX_RISK_LEVEL);
    assert_eq!(assessment.risk_factors.len(), 3);

    let terrain = &assessment.risk_factors[2];
    let max_local = route.waypoints.iter().map(|w| w.local_risk_level).max().unwrap();
    assert_eq!(terrain.impact_level, max_local, "terrain factor is the max waypoint risk");

    for waypoint in &route.waypoints {
        assert!(waypoint.local_risk_level <= MAX_RISK_LEVEL);
        assert_eq!(waypoint.is_risk_point, waypoint.local_risk_level > 5);
    }

    let weight_sum: f64 = assessment.risk_factors.iter().map(|f| f.weight).sum();
    assert!((weight_sum - 1.0).abs() < 1e-9);
    assert!(assessment.weather_conditions.ends_with(": Simulated weather data for development"));
    assert_eq!(route.assessment.as_ref(), Some(&assessment));
}

#[test]
fn test_reassessment_replaces_previous_result() {
    let svc = service(42);
    let mut route = ballard_to_fremont();
    svc.assess_route(&mut route).unwrap();
    let second = svc.assess_route(&mut route).unwrap();
    assert_eq!(route.assessment, Some(second));
}

#[test]
fn test_single_waypoint_route_is_scored() {
    let mut route = DeliveryRoute::new("solo", "Solo", vec![Waypoint::new(0.0, 0.0, 0)]);
    let assessment = service(1).assess_route(&mut route).unwrap();
    assert!(assessment.overall_risk <= MAX_RISK_LEVEL);
}

#[test]
fn test_empty_route_fails_as_invalid() {
    let mut route = DeliveryRoute::new("route0", "Empty", Vec::new());
    let err = service(42).assess_route(&mut route).unwrap_err();
    assert_eq!(err, EngineError::EmptyRoute("route0".to_string()));
}

// ---------------------------------------------------------------------------
// 5. Point risk model
// ---------------------------------------------------------------------------

#[test]
fn test_point_risk_properties() {
    assert_eq!(flood_risk(0.0, ConditionCategory::Clear), 0);
    assert!(risk_description(9).contains("High risk"));
    assert!(risk_description(0).contains("Minimal"));
}
