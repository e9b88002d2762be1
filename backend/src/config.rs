//! Configuration management for the Herd Manager server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with HERD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{AlertWindows, DEFAULT_PREVIEW_SIZE, PREGNANCY_CHECK_WINDOW_DAYS};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Where herd collections come from
    pub data: DataConfig,

    /// Alert windows that are not per-farm parameters
    pub alerts: AlertsConfig,

    /// Log output format
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// JSON snapshot bundle loaded at startup
    pub snapshot_path: Option<String>,

    /// Serve the sample herd when no snapshot is configured
    pub use_sample_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Pregnancy-check look-ahead, clamped to 1..=90
    pub pregnancy_check_window_days: i64,

    /// Number of alerts in the summary preview
    pub preview_size: usize,

    /// Changes closer together than this are recomputed once
    pub recompute_quiescence_ms: u64,
}

impl AlertsConfig {
    pub fn windows(&self) -> AlertWindows {
        AlertWindows::new(self.pregnancy_check_window_days, self.preview_size)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("HERD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data.use_sample_data", true)?
            .set_default(
                "alerts.pregnancy_check_window_days",
                i64::from(PREGNANCY_CHECK_WINDOW_DAYS.default),
            )?
            .set_default("alerts.preview_size", DEFAULT_PREVIEW_SIZE as i64)?
            .set_default("alerts.recompute_quiescence_ms", 2000)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HERD_ prefix)
            .add_source(
                Environment::with_prefix("HERD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            use_sample_data: true,
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            pregnancy_check_window_days: i64::from(PREGNANCY_CHECK_WINDOW_DAYS.default),
            preview_size: DEFAULT_PREVIEW_SIZE,
            recompute_quiescence_ms: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            data: DataConfig::default(),
            alerts: AlertsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_windows_from_config() {
        let alerts = AlertsConfig {
            pregnancy_check_window_days: 7,
            preview_size: 5,
            recompute_quiescence_ms: 100,
        };
        let windows = alerts.windows();
        assert_eq!(windows.pregnancy_check_days(), 7);
        assert_eq!(windows.preview_size(), 5);
    }

    #[test]
    fn test_out_of_range_window_is_clamped() {
        let alerts = AlertsConfig {
            pregnancy_check_window_days: 365,
            ..AlertsConfig::default()
        };
        assert_eq!(alerts.windows().pregnancy_check_days(), 90);
    }
}
