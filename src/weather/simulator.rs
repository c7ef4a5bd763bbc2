/// Simulated weather generator.
///
/// Produces current conditions and multi-day forecasts from a single seeded
/// generator. Every call advances the shared state, so repeated calls for
/// the same coordinate return different draws; two simulators built with
/// the same seed and called in the same order return identical records.
///
/// # Clock injection
/// `current_weather_at` and `forecast_from` take the timestamp/date
/// explicitly. The `WeatherSource` impl uses the simulator's clock, which is
/// the wall clock unless the simulator was built with `with_fixed_clock`.
/// Forecast dates are UTC calendar days.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::WeatherSource;
use super::rng::SimRng;
use crate::model::{ConditionCategory, Coordinate, CurrentWeather, ForecastDay};
use crate::region::{BiasProfile, RegionPolicy, RegionRegistry};
use crate::risk::point::{flood_risk, risk_description};

const CURRENT_DESCRIPTION: &str = "Simulated weather data for development";
const FORECAST_DESCRIPTION: &str = "Simulated forecast data for development";

/// Observations are reported this long before they are retrieved.
const OBSERVATION_LAG_HOURS: i64 = 1;

/// Soil saturation floor before any forecast rain, in percent.
const BASE_SOIL_SATURATION_PCT: f64 = 60.0;
/// Saturation added per inch of expected rainfall.
const SATURATION_PER_INCH: f64 = 20.0;

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

pub struct WeatherSimulator {
    rng: Mutex<SimRng>,
    regions: Arc<dyn RegionPolicy>,
    fixed_now: Option<DateTime<Utc>>,
}

impl WeatherSimulator {
    /// Simulator with the given seed and the default region registry.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SimRng::from_seed_u64(seed), Arc::new(RegionRegistry::default()))
    }

    pub fn with_rng(rng: SimRng, regions: Arc<dyn RegionPolicy>) -> Self {
        Self {
            rng: Mutex::new(rng),
            regions,
            fixed_now: None,
        }
    }

    /// Pins the clock used by the `WeatherSource` impl.
    pub fn with_fixed_clock(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    fn lock_rng(&self) -> MutexGuard<'_, SimRng> {
        // A panic mid-draw leaves the generator usable; keep going.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current conditions at `coordinate`, retrieved at `now`.
    pub fn current_weather_at(&self, coordinate: Coordinate, now: DateTime<Utc>) -> CurrentWeather {
        let profile = self.regions.classify(coordinate);
        let mut rng = self.lock_rng();

        let conditions = match profile {
            BiasProfile::Wet => ConditionCategory::from_index(rng.below(2) + 3),
            BiasProfile::Standard => ConditionCategory::from_index(rng.below(5)),
        };
        let recent_rainfall_in = match profile {
            BiasProfile::Wet => rng.spread(0.5, 2.0),
            BiasProfile::Standard => rng.spread(0.0, 1.0),
        };

        let temperature_f = rng.spread(45.0, 20.0);
        let humidity_pct = rng.spread(70.0, 30.0);
        let wind_speed_mph = rng.spread(5.0, 15.0);
        let wind_direction_deg = rng.below(360) as u16;
        let precipitation_in = if conditions.index() >= 3 {
            rng.spread(0.1, 0.5)
        } else {
            0.0
        };
        let precipitation_probability_pct = if conditions.index() >= 2 {
            rng.spread(50.0, 50.0)
        } else {
            0.0
        };
        drop(rng);

        CurrentWeather {
            coordinate,
            location: format!("Location near {}", coordinate),
            conditions,
            description: CURRENT_DESCRIPTION.to_string(),
            temperature_f,
            humidity_pct,
            wind_speed_mph,
            wind_direction_deg,
            precipitation_in,
            precipitation_probability_pct,
            recent_rainfall_in,
            flood_risk_level: flood_risk(recent_rainfall_in, conditions),
            observation_time: now - Duration::hours(OBSERVATION_LAG_HOURS),
            retrieval_time: now,
        }
    }

    /// `days` forecast entries for `coordinate`, the first dated `today`.
    pub fn forecast_from(&self, coordinate: Coordinate, days: usize, today: NaiveDate) -> Vec<ForecastDay> {
        let profile = self.regions.classify(coordinate);
        let mut rng = self.lock_rng();

        (0..days)
            .map(|day| {
                // Wet regions drift rainier over the first three days of each cycle.
                let conditions = match profile {
                    BiasProfile::Wet => ConditionCategory::from_index(rng.below(3) + day % 3),
                    BiasProfile::Standard => ConditionCategory::from_index(rng.below(5)),
                };
                let expected_rainfall_in = match conditions {
                    ConditionCategory::HeavyRain => rng.spread(1.0, 1.5),
                    ConditionCategory::LightRain => rng.spread(0.1, 0.7),
                    _ => 0.0,
                };
                let soil_saturation_pct =
                    (BASE_SOIL_SATURATION_PCT + expected_rainfall_in * SATURATION_PER_INCH).min(100.0);
                let flood_risk_level = flood_risk(expected_rainfall_in, conditions);

                let high_temperature_f = rng.spread(45.0, 20.0);
                let low_temperature_f = rng.spread(35.0, 15.0);
                let precipitation_probability_pct = if conditions.index() >= 2 {
                    rng.spread(50.0, 50.0)
                } else {
                    0.0
                };
                let humidity_pct = rng.spread(70.0, 30.0);
                let wind_speed_mph = rng.spread(5.0, 15.0);

                ForecastDay {
                    coordinate,
                    date: today + Duration::days(day as i64),
                    conditions,
                    description: FORECAST_DESCRIPTION.to_string(),
                    high_temperature_f,
                    low_temperature_f,
                    precipitation_probability_pct,
                    expected_rainfall_in,
                    humidity_pct,
                    wind_speed_mph,
                    soil_saturation_pct,
                    flood_risk_level,
                    flood_risk_description: risk_description(flood_risk_level).to_string(),
                }
            })
            .collect()
    }
}

impl Default for WeatherSimulator {
    fn default() -> Self {
        Self::with_rng(SimRng::default(), Arc::new(RegionRegistry::default()))
    }
}

impl WeatherSource for WeatherSimulator {
    fn current_weather(&self, coordinate: Coordinate) -> CurrentWeather {
        self.current_weather_at(coordinate, self.now())
    }

    fn forecast(&self, coordinate: Coordinate, days: usize) -> Vec<ForecastDay> {
        self.forecast_from(coordinate, days, self.now().date_naive())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
