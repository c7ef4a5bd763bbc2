/// Core data types for the flood route risk engine.
///
/// This module defines the shared domain model imported by all other modules:
/// coordinates, condition categories, simulated weather records, delivery
/// routes and their risk assessments, plus the engine's error type.
/// It contains no simulation or scoring logic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// A WGS84 point. No normalization is applied; `service` validates ranges
/// before anything reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Condition categories
// ---------------------------------------------------------------------------

/// Weather severity classification, in ascending order of severity.
///
/// The ordinal (0–4) drives both simulated attributes and the risk
/// multiplier in `risk::point::flood_risk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    LightRain,
    HeavyRain,
}

impl ConditionCategory {
    /// All categories in ordinal order.
    pub const ALL: [ConditionCategory; 5] = [
        ConditionCategory::Clear,
        ConditionCategory::PartlyCloudy,
        ConditionCategory::Cloudy,
        ConditionCategory::LightRain,
        ConditionCategory::HeavyRain,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps an ordinal back to a category, saturating at `HeavyRain`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Rain is falling (LightRain or HeavyRain).
    pub fn is_raining(self) -> bool {
        self.index() >= ConditionCategory::LightRain.index()
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionCategory::Clear => write!(f, "Clear"),
            ConditionCategory::PartlyCloudy => write!(f, "Partly Cloudy"),
            ConditionCategory::Cloudy => write!(f, "Cloudy"),
            ConditionCategory::LightRain => write!(f, "Light Rain"),
            ConditionCategory::HeavyRain => write!(f, "Heavy Rain"),
        }
    }
}

// ---------------------------------------------------------------------------
// Weather records
// ---------------------------------------------------------------------------

/// Current conditions at a coordinate, produced fresh on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub coordinate: Coordinate,
    pub location: String,
    pub conditions: ConditionCategory,
    pub description: String,
    pub temperature_f: f64,
    pub humidity_pct: f64,
    pub wind_speed_mph: f64,
    pub wind_direction_deg: u16,
    pub precipitation_in: f64,
    pub precipitation_probability_pct: f64,
    /// Accumulated rainfall over the past 24 hours, in inches.
    pub recent_rainfall_in: f64,
    /// 0–10, see `risk::point::flood_risk`.
    pub flood_risk_level: u8,
    pub observation_time: DateTime<Utc>,
    pub retrieval_time: DateTime<Utc>,
}

/// One day of a simulated forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub coordinate: Coordinate,
    pub date: NaiveDate,
    pub conditions: ConditionCategory,
    pub description: String,
    pub high_temperature_f: f64,
    pub low_temperature_f: f64,
    pub precipitation_probability_pct: f64,
    pub expected_rainfall_in: f64,
    pub humidity_pct: f64,
    pub wind_speed_mph: f64,
    /// 0–100.
    pub soil_saturation_pct: f64,
    pub flood_risk_level: u8,
    pub flood_risk_description: String,
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// A point along a delivery route. The risk fields are written by
/// `route::aggregator::RouteRiskAggregator::assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sequence_number: u32,
    #[serde(default)]
    pub local_risk_level: u8,
    #[serde(default)]
    pub is_risk_point: bool,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64, sequence_number: u32) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            name: None,
            description: None,
            sequence_number,
            local_risk_level: 0,
            is_risk_point: false,
        }
    }

    pub fn named(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self
    }
}

/// A delivery route with its ordered waypoints and business metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRoute {
    pub route_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub distance_miles: f64,
    #[serde(default)]
    pub estimated_minutes: u32,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub affected_products: Vec<String>,
    pub waypoints: Vec<Waypoint>,
    /// Most recent assessment; recomputed on every read, never updated
    /// incrementally.
    #[serde(default, skip_deserializing)]
    pub assessment: Option<RouteRiskAssessment>,
}

impl DeliveryRoute {
    pub fn new(route_id: &str, name: &str, waypoints: Vec<Waypoint>) -> Self {
        Self {
            route_id: route_id.to_string(),
            name: name.to_string(),
            description: String::new(),
            distance_miles: 0.0,
            estimated_minutes: 0,
            supplier: String::new(),
            affected_products: Vec::new(),
            waypoints,
            assessment: None,
        }
    }

    /// Waypoints flagged as risk points by the last assessment.
    pub fn risk_points(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(|w| w.is_risk_point)
    }
}

// ---------------------------------------------------------------------------
// Risk assessment types
// ---------------------------------------------------------------------------

/// A named, weighted contributor to an overall route risk.
/// Used for explainability only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub name: String,
    pub description: String,
    /// 0–10.
    pub impact_level: u8,
    /// 0.0–1.0.
    pub weight: f64,
}

impl RiskFactor {
    pub fn weighted_impact(&self) -> f64 {
        f64::from(self.impact_level) * self.weight
    }
}

/// Result of assessing one route.
///
/// `risk_factors` always holds exactly three entries in the order
/// Current Weather, Weather Forecast, Route Terrain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRiskAssessment {
    pub overall_risk: u8,
    pub risk_factors: Vec<RiskFactor>,
    /// "<conditions>: <description>" of the first waypoint's current weather.
    pub weather_conditions: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Input rejected at the engine boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Non-finite or out-of-range latitude/longitude.
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// A route needs at least one waypoint to be assessed.
    #[error("Invalid route {0}: no waypoints")]
    EmptyRoute(String),
}
