/// TOML configuration loader
///
/// Loads simulator, logging, bias-region and sample-route settings from
/// `floodroute.toml`, then applies environment overrides (after reading
/// `.env` when present):
///
/// - `FLOODROUTE_CONFIG` — path to the TOML file
/// - `FLOODROUTE_SEED`   — simulator seed (overrides `[simulator] seed`)
/// - `FLOODROUTE_LOG`    — log level (overrides `[logging] level`)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::logging::LogLevel;
use crate::model::DeliveryRoute;
use crate::region::{BiasedRegion, RegionRegistry};
use crate::weather::WeatherSimulator;
use crate::weather::rng::{SimRng, time_seed};

pub const DEFAULT_CONFIG_PATH: &str = "floodroute.toml";

pub const ENV_CONFIG_PATH: &str = "FLOODROUTE_CONFIG";
pub const ENV_SEED: &str = "FLOODROUTE_SEED";
pub const ENV_LOG_LEVEL: &str = "FLOODROUTE_LOG";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Region '{0}' has empty or non-finite bounds")]
    InvalidRegion(String),
    #[error("Invalid seed '{0}': expected an unsigned integer")]
    InvalidSeed(String),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

// ============================================================================
// TOML Configuration Structures
// ============================================================================

/// Root TOML structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulator: SimulatorConfig,
    pub logging: LoggingConfig,
    pub regions: Vec<BiasedRegion>,
    pub routes: Vec<DeliveryRoute>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Absent means a time-derived seed.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse configuration from TOML text and validate it.
pub fn parse_config(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load `.env`, pick the config path from the environment, and apply
/// overrides. A missing default file yields the built-in defaults; a
/// missing file named explicitly by `FLOODROUTE_CONFIG` is an error.
pub fn load_from_env() -> Result<EngineConfig, ConfigError> {
    dotenv::dotenv().ok();

    let mut config = match env::var(ENV_CONFIG_PATH) {
        Ok(path) => load_config(path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        Err(_) => EngineConfig::default(),
    };

    config.apply_overrides(env::var(ENV_SEED).ok().as_deref(), env::var(ENV_LOG_LEVEL).ok().as_deref())?;
    Ok(config)
}

// ============================================================================
// Derived settings
// ============================================================================

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(region) = self.regions.iter().find(|r| !r.is_well_formed()) {
            return Err(ConfigError::InvalidRegion(region.name.clone()));
        }
        self.log_level()?;
        Ok(())
    }

    /// Apply seed / log-level overrides given as raw strings.
    pub fn apply_overrides(&mut self, seed: Option<&str>, log_level: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = seed {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw.to_string()))?;
            self.simulator.seed = Some(parsed);
        }
        if let Some(raw) = log_level {
            self.logging.level = raw.to_string();
            self.log_level()?;
        }
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.logging.level.parse().map_err(ConfigError::InvalidLogLevel)
    }

    /// Configured seed, or one drawn from the clock.
    pub fn resolved_seed(&self) -> u64 {
        self.simulator.seed.unwrap_or_else(time_seed)
    }

    /// Configured regions, or the Pacific Northwest default when none are listed.
    pub fn region_registry(&self) -> RegionRegistry {
        if self.regions.is_empty() {
            RegionRegistry::default()
        } else {
            RegionRegistry::new(self.regions.clone())
        }
    }

    pub fn build_simulator(&self) -> WeatherSimulator {
        WeatherSimulator::with_rng(
            SimRng::from_seed_u64(self.resolved_seed()),
            Arc::new(self.region_registry()),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
