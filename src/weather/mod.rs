/// Weather data for risk scoring.
///
/// Submodules:
/// - `rng` — owned deterministic generator.
/// - `simulator` — seeded current-conditions and forecast generator.
///
/// Scoring code depends only on the `WeatherSource` trait, so a live
/// weather feed could replace the simulator without touching `risk` or
/// `route`.

pub mod rng;
pub mod simulator;

use crate::model::{Coordinate, CurrentWeather, ForecastDay};

pub use simulator::WeatherSimulator;

/// Anything that can report current conditions and a daily forecast.
pub trait WeatherSource {
    /// Current conditions at `coordinate`.
    fn current_weather(&self, coordinate: Coordinate) -> CurrentWeather;

    /// `days` forecast entries starting today, in date order. Callers
    /// are responsible for keeping `days` within the supported range.
    fn forecast(&self, coordinate: Coordinate, days: usize) -> Vec<ForecastDay>;
}
