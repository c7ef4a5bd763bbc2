//! Flood risk scoring for delivery routes.
//!
//! A seeded weather simulator feeds two risk formulas (single reading and
//! composite location risk), which the route aggregator blends into one
//! explainable score per route. `service` is the validating entry point for
//! callers; `config` and `logging` carry the ambient setup.

pub mod config;
pub mod logging;
pub mod model;
pub mod region;
pub mod risk;
pub mod route;
pub mod service;
pub mod weather;

pub use model::{
    ConditionCategory, Coordinate, CurrentWeather, DeliveryRoute, EngineError, ForecastDay, RiskFactor,
    RouteRiskAssessment, Waypoint,
};
pub use service::FloodRiskService;
pub use weather::{WeatherSimulator, WeatherSource};
