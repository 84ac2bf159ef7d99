//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Region, ScenarioInput, DEFAULT_MIN_MARGIN};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Planner defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Region used to bucket history when none is given
    #[serde(default)]
    pub region: Region,

    /// Minimum VP gap between consecutively ranked teams
    #[serde(default = "default_min_margin")]
    pub min_margin: u32,
}

fn default_min_margin() -> u32 {
    DEFAULT_MIN_MARGIN
}

impl PlannerConfig {
    /// Fill in the margin of a scenario that does not set one.
    pub fn apply_defaults(&self, scenario: &mut ScenarioInput) {
        scenario.min_margin = scenario.min_margin.or(Some(self.min_margin));
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            min_margin: default_min_margin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub planner: PlannerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            planner: PlannerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planner.min_margin == 0 {
            return Err(ConfigError::ValidationError(
                "Planner min_margin must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
