/// Route-level risk assessment.
///
/// Submodules:
/// - `aggregator` — combines waypoint, current-weather and forecast risk
///   into one weighted score with an explanation.

pub mod aggregator;

pub use aggregator::{overall_risk, RouteRiskAggregator};
