//! Boundary between route management and the risk engine.
//!
//! Everything arriving from outside is validated or defaulted here before
//! the engine sees it: coordinates must be in geographic range, forecast
//! day counts outside 1–7 fall back to 5, and routes must carry at least
//! one waypoint. The engine itself assumes validated input.

use crate::logging::{self, Component};
use crate::model::{Coordinate, CurrentWeather, DeliveryRoute, EngineError, ForecastDay, RouteRiskAssessment};
use crate::risk::location::flood_risk_for_location;
use crate::route::aggregator::RouteRiskAggregator;
use crate::weather::WeatherSource;

pub const MIN_FORECAST_DAYS: i64 = 1;
pub const MAX_FORECAST_DAYS: i64 = 7;
pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Clamps a requested day count: anything outside 1–7 becomes 5.
pub fn normalize_forecast_days(requested: i64) -> usize {
    if (MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&requested) {
        requested as usize
    } else {
        DEFAULT_FORECAST_DAYS
    }
}

/// Builds a coordinate, rejecting non-finite or out-of-range values.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<Coordinate, EngineError> {
    let coordinate = Coordinate::new(latitude, longitude);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        logging::warn(
            Component::Service,
            None,
            &format!("rejected coordinate ({}, {})", latitude, longitude),
        );
        Err(EngineError::InvalidCoordinate { latitude, longitude })
    }
}

// ---------------------------------------------------------------------------
// Service facade
// ---------------------------------------------------------------------------

/// Validating front door over a `WeatherSource`.
pub struct FloodRiskService<S: WeatherSource> {
    source: S,
}

impl<S: WeatherSource> FloodRiskService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, EngineError> {
        let coordinate = validate_coordinate(latitude, longitude)?;
        Ok(self.source.current_weather(coordinate))
    }

    /// Forecast for a raw requested day count; see `normalize_forecast_days`.
    pub fn forecast(&self, latitude: f64, longitude: f64, days: i64) -> Result<Vec<ForecastDay>, EngineError> {
        let coordinate = validate_coordinate(latitude, longitude)?;
        let days = normalize_forecast_days(days);
        Ok(self.source.forecast(coordinate, days))
    }

    /// Composite 0–10 flood risk for a location.
    pub fn flood_risk(&self, latitude: f64, longitude: f64) -> Result<u8, EngineError> {
        let coordinate = validate_coordinate(latitude, longitude)?;
        Ok(flood_risk_for_location(&self.source, coordinate))
    }

    /// Validates every waypoint, then assesses the route in place. An empty
    /// route is rejected (and logged) by the aggregator.
    pub fn assess_route(&self, route: &mut DeliveryRoute) -> Result<RouteRiskAssessment, EngineError> {
        for waypoint in &route.waypoints {
            validate_coordinate(waypoint.coordinate.latitude, waypoint.coordinate.longitude)?;
        }
        RouteRiskAggregator::new(&self.source).assess(route)
    }

    /// Assesses every route, in order. One bad route does not stop the rest.
    pub fn assess_all(&self, routes: &mut [DeliveryRoute]) -> Vec<Result<RouteRiskAssessment, EngineError>> {
        routes
            .iter_mut()
            .map(|route| {
                let result = self.assess_route(route);
                if let Err(err) = &result {
                    logging::log_failure(Component::Service, &route.route_id, "route assessment", err);
                }
                result
            })
            .collect()
    }
}
