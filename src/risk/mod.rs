/// Flood risk scoring.
///
/// Submodules:
/// - `point` — single-reading risk from rainfall and conditions, plus the
///   textual risk tiers.
/// - `location` — composite risk combining recent rainfall with the next
///   three days of forecast rain.
///
/// The two formulas are deliberately distinct and must not be merged.

pub mod location;
pub mod point;

pub use location::flood_risk_for_location;
pub use point::{flood_risk, risk_description, RiskTier, MAX_RISK_LEVEL};
