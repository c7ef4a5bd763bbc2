/// Assess the configured sample routes and print the results as JSON.
///
/// Usage: `floodroute_service [CONFIG_PATH]`
/// Without an argument the config path comes from `FLOODROUTE_CONFIG`,
/// falling back to `./floodroute.toml`.

use std::env;
use std::process::ExitCode;

use floodroute_service::config::{self, EngineConfig};
use floodroute_service::logging::{self, Component};
use floodroute_service::risk::RiskTier;
use floodroute_service::FloodRiskService;

fn load(path: Option<String>) -> Result<EngineConfig, config::ConfigError> {
    match path {
        Some(path) => {
            dotenv::dotenv().ok();
            let mut loaded = config::load_config(path)?;
            loaded.apply_overrides(
                env::var(config::ENV_SEED).ok().as_deref(),
                env::var(config::ENV_LOG_LEVEL).ok().as_deref(),
            )?;
            Ok(loaded)
        }
        None => config::load_from_env(),
    }
}

fn main() -> ExitCode {
    let mut config = match load(env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Validated during load
    let level = config.log_level().unwrap_or(logging::LogLevel::Info);
    logging::init_logger(level, config.logging.json);

    let seed = config.resolved_seed();
    logging::info(Component::Config, None, &format!("simulator seed {}", seed));

    config.simulator.seed = Some(seed);
    let service = FloodRiskService::new(config.build_simulator());

    let mut routes = std::mem::take(&mut config.routes);
    let results = service.assess_all(&mut routes);

    let failed = results.iter().filter(|r| r.is_err()).count();
    let high_risk = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter(|a| RiskTier::from_level(a.overall_risk) == RiskTier::High)
        .count();
    logging::log_assessment_summary(routes.len(), high_risk, failed);

    match serde_json::to_string_pretty(&routes) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            logging::log_failure(Component::System, "output", "JSON serialization", &e);
            return ExitCode::FAILURE;
        }
    }

    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
