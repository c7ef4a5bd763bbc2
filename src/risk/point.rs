//! Single-reading flood risk.
//!
//! Converts one rainfall amount plus its condition category into a 0–10
//! risk level. Both current-weather risk and per-forecast-day risk go
//! through `flood_risk`; nothing else should derive a level from a
//! single reading.

use crate::model::ConditionCategory;

/// Highest possible risk level.
pub const MAX_RISK_LEVEL: u8 = 10;

/// Risk points contributed per inch of rainfall, before the condition
/// multiplier.
const RISK_PER_INCH: f64 = 2.5;

/// Rounds a raw score and clamps it into `0..=MAX_RISK_LEVEL`.
pub fn clamp_risk(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, f64::from(MAX_RISK_LEVEL)) as u8
}

/// Multiplier applied to rainfall-based risk for the current conditions.
pub fn condition_multiplier(conditions: ConditionCategory) -> f64 {
    match conditions {
        ConditionCategory::HeavyRain => 1.5,
        ConditionCategory::LightRain => 1.2,
        _ => 1.0,
    }
}

/// Flood risk for a single rainfall reading.
///
/// `round(rainfall * 2.5 * multiplier)` clamped to 0–10.
/// 0.5" of rain under clear skies is level 1; 2" of heavy rain is 8.
pub fn flood_risk(rainfall_in: f64, conditions: ConditionCategory) -> u8 {
    clamp_risk(rainfall_in * RISK_PER_INCH * condition_multiplier(conditions))
}

// ---------------------------------------------------------------------------
// Risk tiers
// ---------------------------------------------------------------------------

/// Flood risk tiers, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    Minimal,
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// 8+ high, 5–7 moderate, 2–4 low, 0–1 minimal.
    pub fn from_level(level: u8) -> Self {
        match level {
            8.. => RiskTier::High,
            5..=7 => RiskTier::Moderate,
            2..=4 => RiskTier::Low,
            _ => RiskTier::Minimal,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskTier::High => "High risk of flooding. Consider alternate routes.",
            RiskTier::Moderate => "Moderate flood risk. Monitor conditions.",
            RiskTier::Low => "Low flood risk. Exercise normal caution.",
            RiskTier::Minimal => "Minimal flood risk.",
        }
    }
}

/// Human-readable description of a risk level.
pub fn risk_description(level: u8) -> &'static str {
    RiskTier::from_level(level).description()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
