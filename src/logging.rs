/// Structured logging for the flood route risk engine
///
/// Provides context-rich logging tagged with the emitting component and an
/// optional context id (route id, coordinate). Events go through `tracing`;
/// `init_logger` installs a `tracing-subscriber` formatter for console or
/// JSON output.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Aggregator,
    Service,
    Config,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Aggregator => write!(f, "ROUTE"),
            Component::Service => write!(f, "SVC"),
            Component::Config => write!(f, "CFG"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Subscriber setup
// ---------------------------------------------------------------------------

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `min_level`. Calling this twice is harmless; the first call wins.
pub fn init_logger(min_level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(min_level.as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        debug(Component::System, None, "logger already initialized");
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Log a general informational message
pub fn info(component: Component, context: Option<&str>, message: &str) {
    tracing::info!(component = %component, context = context.unwrap_or("-"), "{}", message);
}

/// Log a warning message
pub fn warn(component: Component, context: Option<&str>, message: &str) {
    tracing::warn!(component = %component, context = context.unwrap_or("-"), "{}", message);
}

/// Log an error message
pub fn error(component: Component, context: Option<&str>, message: &str) {
    tracing::error!(component = %component, context = context.unwrap_or("-"), "{}", message);
}

/// Log a debug message
pub fn debug(component: Component, context: Option<&str>, message: &str) {
    tracing::debug!(component = %component, context = context.unwrap_or("-"), "{}", message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a failed engine operation with the error that caused it.
pub fn log_failure(component: Component, context: &str, operation: &str, err: &dyn std::error::Error) {
    let message = format!("{} failed: {}", operation, err);
    error(component, Some(context), &message);
}

// ---------------------------------------------------------------------------
// Assessment Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a batch of route assessments
pub fn log_assessment_summary(total: usize, high_risk: usize, failed: usize) {
    let message = format!(
        "Assessment complete: {}/{} routes scored, {} high risk, {} failed",
        total.saturating_sub(failed),
        total,
        high_risk,
        failed
    );

    if failed == 0 && high_risk == 0 {
        info(Component::Aggregator, None, &message);
    } else if failed == total && total > 0 {
        error(Component::Aggregator, None, &message);
    } else {
        warn(Component::Aggregator, None, &message);
    }
}
