use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_DIR_VAR: &str = "RISK_PROFILE_DATA_DIR";
pub const LOG_LEVEL_VAR: &str = "RISK_PROFILE_LOG_LEVEL";

/// Top-level configuration for the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the reference CSV files.
    pub data_dir: PathBuf,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var(DATA_DIR_VAR) {
            Ok(value) if value.trim().is_empty() => return Err(ConfigError::EmptyDataDir),
            Ok(value) => PathBuf::from(value.trim()),
            Err(_) => PathBuf::from("."),
        };
        let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            data_dir,
            telemetry: TelemetryConfig { log_level },
        })
    }

    /// A `--data-dir` flag wins over the environment.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RISK_PROFILE_DATA_DIR is set but empty")]
    EmptyDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var(DATA_DIR_VAR);
        env::remove_var(LOG_LEVEL_VAR);
    }

    #[test]
    fn test_load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn test_load_reads_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(DATA_DIR_VAR, "/srv/risk-data");
        env::set_var(LOG_LEVEL_VAR, "debug");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.data_dir, PathBuf::from("/srv/risk-data"));
        assert_eq!(config.telemetry.log_level, "debug");
        reset_env();
    }

    #[test]
    fn test_empty_data_dir_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(DATA_DIR_VAR, "  ");

        assert!(matches!(AppConfig::load(), Err(ConfigError::EmptyDataDir)));
        reset_env();
    }

    #[test]
    fn test_flag_overrides_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(DATA_DIR_VAR, "/from/env");

        let config = AppConfig::load()
            .expect("config loads")
            .with_data_dir(Some(PathBuf::from("/from/flag")));
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));

        let config = AppConfig::load().expect("config loads").with_data_dir(None);
        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        reset_env();
    }
}
