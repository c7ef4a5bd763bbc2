//! Route-level risk aggregation.
//!
//! Blends three weighted signals into one explainable 0–10 score:
//!
//! | factor           | weight | impact                                        |
//! |------------------|--------|-----------------------------------------------|
//! | Current Weather  | 0.4    | first waypoint's current flood-risk level     |
//! | Weather Forecast | 0.3    | composite 3-day risk at the first waypoint    |
//! | Route Terrain    | 0.3    | highest composite risk across all waypoints   |
//!
//! `assess` writes each waypoint's local risk and risk-point flag as a side
//! effect and stores the assessment on the route.
//!
//! The forecast factor draws fresh weather for the first waypoint rather
//! than reusing the value computed for it in the terrain pass, so the two
//! can disagree for the same location.

use crate::logging::{self, Component};
use crate::model::{DeliveryRoute, EngineError, RiskFactor, RouteRiskAssessment};
use crate::risk::location::flood_risk_for_location;
use crate::risk::point::clamp_risk;
use crate::weather::WeatherSource;

pub const CURRENT_WEATHER_WEIGHT: f64 = 0.4;
pub const FORECAST_WEIGHT: f64 = 0.3;
pub const TERRAIN_WEIGHT: f64 = 0.3;

/// Waypoints above this local level are flagged as risk points.
pub const RISK_POINT_THRESHOLD: u8 = 5;

const FORECAST_FACTOR_DESCRIPTION: &str = "Based on precipitation forecast for next 72 hours";
const TERRAIN_FACTOR_DESCRIPTION: &str = "Based on elevation changes and known flood zones";

pub struct RouteRiskAggregator<'a, S: WeatherSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: WeatherSource + ?Sized> RouteRiskAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Scores `route`, annotating its waypoints in place.
    ///
    /// Returns `EngineError::EmptyRoute` without touching the route when it
    /// has no waypoints.
    pub fn assess(&self, route: &mut DeliveryRoute) -> Result<RouteRiskAssessment, EngineError> {
        let origin = match route.waypoints.first() {
            Some(waypoint) => waypoint.coordinate,
            None => {
                logging::warn(
                    Component::Aggregator,
                    Some(&route.route_id),
                    "cannot assess a route with no waypoints",
                );
                return Err(EngineError::EmptyRoute(route.route_id.clone()));
            }
        };

        // Terrain pass
        let mut max_waypoint_risk: u8 = 0;
        for waypoint in route.waypoints.iter_mut() {
            let local_risk = flood_risk_for_location(self.source, waypoint.coordinate);
            waypoint.local_risk_level = local_risk;
            waypoint.is_risk_point = local_risk > RISK_POINT_THRESHOLD;
            max_waypoint_risk = max_waypoint_risk.max(local_risk);

            logging::debug(
                Component::Aggregator,
                Some(&route.route_id),
                &format!(
                    "waypoint {} ({}) local risk {}{}",
                    waypoint.sequence_number,
                    waypoint.coordinate,
                    local_risk,
                    if waypoint.is_risk_point { " [risk point]" } else { "" }
                ),
            );
        }

        let weather = self.source.current_weather(origin);
        let forecast_risk = flood_risk_for_location(self.source, origin);

        let risk_factors = vec![
            RiskFactor {
                name: "Current Weather".to_string(),
                description: weather.conditions.to_string(),
                impact_level: weather.flood_risk_level,
                weight: CURRENT_WEATHER_WEIGHT,
            },
            RiskFactor {
                name: "Weather Forecast".to_string(),
                description: FORECAST_FACTOR_DESCRIPTION.to_string(),
                impact_level: forecast_risk,
                weight: FORECAST_WEIGHT,
            },
            RiskFactor {
                name: "Route Terrain".to_string(),
                description: TERRAIN_FACTOR_DESCRIPTION.to_string(),
                impact_level: max_waypoint_risk,
                weight: TERRAIN_WEIGHT,
            },
        ];

        let overall_risk = overall_risk(&risk_factors);
        let assessment = RouteRiskAssessment {
            overall_risk,
            risk_factors,
            weather_conditions: format!("{}: {}", weather.conditions, weather.description),
        };

        logging::info(
            Component::Aggregator,
            Some(&route.route_id),
            &format!(
                "overall risk {} (current {}, forecast {}, terrain {})",
                overall_risk, weather.flood_risk_level, forecast_risk, max_waypoint_risk
            ),
        );

        route.assessment = Some(assessment.clone());
        Ok(assessment)
    }
}

/// Weighted sum of factor impacts, rounded and clamped to 0–10.
pub fn overall_risk(factors: &[RiskFactor]) -> u8 {
    clamp_risk(factors.iter().map(RiskFactor::weighted_impact).sum())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConditionCategory, Coordinate, CurrentWeather, ForecastDay, Waypoint,
    };
    use crate::weather::WeatherSimulator;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    /// Fixed-output weather: every location reports the same recent rainfall
    /// and a dry forecast. Counts current-weather calls.
    struct FixedWeather {
        recent_rainfall_in: f64,
        flood_risk_level: u8,
        calls: Cell<usize>,
    }

    impl FixedWeather {
        fn new(recent_rainfall_in: f64, flood_risk_level: u8) -> Self {
            Self { recent_rainfall_in, flood_risk_level, calls: Cell::new(0) }
        }
    }

    impl WeatherSource for FixedWeather {
        fn current_weather(&self, coordinate: Coordinate) -> CurrentWeather {
            self.calls.set(self.calls.get() + 1);
            let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
            CurrentWeather {
                coordinate,
                location: "test".to_string(),
                conditions: ConditionCategory::LightRain,
                description: "Fixed".to_string(),
                temperature_f: 50.0,
                humidity_pct: 80.0,
                wind_speed_mph: 10.0,
                wind_direction_deg: 180,
                precipitation_in: 0.2,
                precipitation_probability_pct: 60.0,
                recent_rainfall_in: self.recent_rainfall_in,
                flood_risk_level: self.flood_risk_level,
                observation_time: now,
                retrieval_time: now,
            }
        }

        fn forecast(&self, _coordinate: Coordinate, _days: usize) -> Vec<ForecastDay> {
            Vec::new()
        }
    }

    fn five_stop_route() -> DeliveryRoute {
        DeliveryRoute::new(
            "route1",
            "Downtown to Capitol Hill",
            vec![
                Waypoint::new(47.6062, -122.3321, 0),
                Waypoint::new(47.6104, -122.3260, 1),
                Waypoint::new(47.6152, -122.3214, 2),
                Waypoint::new(47.6195, -122.3185, 3),
                Waypoint::new(47.6231, -122.3142, 4),
            ],
        )
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = CURRENT_WEATHER_WEIGHT + FORECAST_WEIGHT + TERRAIN_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12, "weights sum to {}", total);
    }

    #[test]
    fn test_weighted_scenario_rounds_to_five() {
        // Composite everywhere: round(3.0 * 2) = 6. Current level 4.
        // round(4*0.4 + 6*0.3 + 6*0.3) = round(5.2) = 5
        let weather = FixedWeather::new(3.0, 4);
        let mut route = five_stop_route();
        let assessment = RouteRiskAggregator::new(&weather).assess(&mut route).unwrap();

        assert_eq!(assessment.overall_risk, 5);
        let impacts: Vec<u8> = assessment.risk_factors.iter().map(|f| f.impact_level).collect();
        assert_eq!(impacts, vec![4, 6, 6]);
        for waypoint in &route.waypoints {
            assert_eq!(waypoint.local_risk_level, 6);
            assert!(waypoint.is_risk_point, "6 > 5 should flag a risk point");
        }
    }

    #[test]
    fn test_factor_order_names_and_weights() {
        let weather = FixedWeather::new(1.0, 2);
        let mut route = five_stop_route();
        let assessment = RouteRiskAggregator::new(&weather).assess(&mut route).unwrap();

        let names: Vec<&str> = assessment.risk_factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Current Weather", "Weather Forecast", "Route Terrain"]);
        let weights: Vec<f64> = assessment.risk_factors.iter().map(|f| f.weight).collect();
        assert_eq!(weights, [0.4, 0.3, 0.3]);
        assert_eq!(assessment.risk_factors[0].description, "Light Rain");
    }

    #[test]
    fn test_level_five_is_not_a_risk_point() {
        // round(2.5 * 2) = 5
        let weather = FixedWeather::new(2.5, 0);
        let mut route = five_stop_route();
        RouteRiskAggregator::new(&weather).assess(&mut route).unwrap();
        assert!(route.waypoints.iter().all(|w| w.local_risk_level == 5 && !w.is_risk_point));
        assert_eq!(route.risk_points().count(), 0);
    }

    #[test]
    fn test_weather_summary_uses_first_waypoint() {
        let weather = FixedWeather::new(0.0, 0);
        let mut route = five_stop_route();
        let assessment = RouteRiskAggregator::new(&weather).assess(&mut route).unwrap();
        assert_eq!(assessment.weather_conditions, "Light Rain: Fixed");
        assert_eq!(route.assessment.as_ref(), Some(&assessment));
    }

    #[test]
    fn test_current_weather_drawn_once_per_waypoint_plus_two() {
        // One composite per waypoint, one current read, one forecast composite.
        let weather = FixedWeather::new(0.0, 0);
        let mut route = five_stop_route();
        RouteRiskAggregator::new(&weather).assess(&mut route).unwrap();
        assert_eq!(weather.calls.get(), 5 + 2);
    }

    #[test]
    fn test_empty_route_is_rejected() {
        let weather = FixedWeather::new(1.0, 1);
        let mut route = DeliveryRoute::new("empty", "Nowhere", Vec::new());
        let result = RouteRiskAggregator::new(&weather).assess(&mut route);
        assert_eq!(result, Err(EngineError::EmptyRoute("empty".to_string())));
        assert!(route.assessment.is_none());
        assert_eq!(weather.calls.get(), 0);
    }

    #[test]
    fn test_overall_risk_bounded_with_simulated_weather() {
        let sim = WeatherSimulator::new(42)
            .with_fixed_clock(Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
        let aggregator = RouteRiskAggregator::new(&sim);
        for stops in 1..=8u32 {
            let waypoints = (0..stops)
                .map(|i| Waypoint::new(47.5 + f64::from(i) * 0.01, -122.3, i))
                .collect();
            let mut route = DeliveryRoute::new("r", "sim", waypoints);
            let assessment = aggregator.assess(&mut route).unwrap();
            assert!(assessment.overall_risk <= 10);
            assert_eq!(assessment.risk_factors.len(), 3);
        }
    }

    #[test]
    fn test_overall_risk_saturates() {
        let factors = vec![
            RiskFactor { name: "a".into(), description: String::new(), impact_level: 10, weight: 0.6 },
            RiskFactor { name: "b".into(), description: String::new(), impact_level: 10, weight: 0.6 },
        ];
        assert_eq!(overall_risk(&factors), 10);
        assert_eq!(overall_risk(&[]), 0);
    }
}
