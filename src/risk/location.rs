//! Composite location risk.
//!
//! Where `point::flood_risk` scores one observation, this scores combined
//! exposure: the past 24 hours of rain plus everything expected over the
//! next three days, with no condition multiplier.

use super::point::clamp_risk;
use crate::model::Coordinate;
use crate::weather::WeatherSource;

/// Forecast window, in days, folded into the composite score.
pub const COMPOSITE_FORECAST_DAYS: usize = 3;

/// Risk points per inch of combined rainfall.
const RISK_PER_COMBINED_INCH: f64 = 2.0;

/// `round((recent + sum(next 3 days expected)) * 2)` clamped to 0–10.
///
/// Draws one current-weather record and one 3-day forecast from `source`,
/// so each call consumes fresh simulated weather.
pub fn flood_risk_for_location<S: WeatherSource + ?Sized>(source: &S, coordinate: Coordinate) -> u8 {
    let current = source.current_weather(coordinate);
    let forecast = source.forecast(coordinate, COMPOSITE_FORECAST_DAYS);
    composite_risk(
        current.recent_rainfall_in,
        forecast.iter().map(|day| day.expected_rainfall_in),
    )
}

/// Scores recent rainfall plus a series of expected daily rainfall amounts.
pub fn composite_risk(recent_rainfall_in: f64, expected_rainfall_in: impl IntoIterator<Item = f64>) -> u8 {
    let expected: f64 = expected_rainfall_in.into_iter().sum();
    clamp_risk((recent_rainfall_in + expected) * RISK_PER_COMBINED_INCH)
}
