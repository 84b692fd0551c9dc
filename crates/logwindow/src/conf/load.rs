//! Load — config loading from file and environment variables.

use std::path::Path;

use crate::error::{AppError, AppResult};
use super::model::{AnalyzerConfig, OutputFormat};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/logwindow/config.toml";

impl AnalyzerConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> AppResult<Self> {
        let config_path = std::env::var("LOGWINDOW_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_string(),
            source,
        })?;

        let config: AnalyzerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Override fields from `LOGWINDOW_*` environment variables.
    pub fn apply_env(&mut self) -> AppResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(v) = var("LOGWINDOW_LINE_WINDOW") {
            self.window.line_window = v
                .parse()
                .map_err(|_| AppError::Config(format!("LOGWINDOW_LINE_WINDOW is not a number: {}", v)))?;
        }
        if let Some(v) = var("LOGWINDOW_TIME_WINDOW_SECS") {
            self.window.time_window_secs = v
                .parse()
                .map_err(|_| AppError::Config(format!("LOGWINDOW_TIME_WINDOW_SECS is not a number: {}", v)))?;
        }
        if let Some(v) = var("LOGWINDOW_OUTPUT") {
            self.output = v.parse::<OutputFormat>().map_err(AppError::Config)?;
        }
        Ok(())
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> AppResult<()> {
        self.window.validate().map_err(AppError::Config)
    }
}
