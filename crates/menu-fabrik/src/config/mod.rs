use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub generation: GenerationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("MENU_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_file = env::var("MENU_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("menu-fabrik.json"));

        let history_limit = match env::var("MENU_HISTORY_LIMIT") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidHistoryLimit(raw)),
            },
            Err(_) => GenerationConfig::DEFAULT_HISTORY_LIMIT,
        };

        let seed = env::var("MENU_SEED")
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidSeed { value: raw, source })
            })
            .transpose()?;

        let log_level = env::var("MENU_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { data_file },
            generation: GenerationConfig {
                history_limit,
                seed,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the household file the CLI reads and writes.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

/// Knobs of the planner service around the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// How many recent slots count as history when regenerating a single slot.
    pub history_limit: usize,
    /// Fixed seed for reproducible plans; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl GenerationConfig {
    pub const DEFAULT_HISTORY_LIMIT: usize = 30;
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            seed: None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHistoryLimit(String),
    InvalidSeed {
        value: String,
        source: std::num::ParseIntError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHistoryLimit(value) => write!(
                f,
                "MENU_HISTORY_LIMIT must be a positive integer, got '{}'",
                value
            ),
            ConfigError::InvalidSeed { value, .. } => {
                write!(f, "MENU_SEED must be an unsigned 64-bit integer, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHistoryLimit(_) => None,
            ConfigError::InvalidSeed { source, .. } => Some(source),
        }
    }
}
