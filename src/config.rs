use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::daysteps::DailyStepsReporter;
use crate::error::{Result, TrackerError};
use crate::formulas::FormulaConfig;
use crate::logging::LogConfig;
use crate::policy::ErrorPolicy;
use crate::training::TrainingReporter;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Formula constants and activity labels
    pub formulas: FormulaConfig,

    /// Error policy per reporter
    pub policy: PolicySettings,

    /// Logging settings
    pub logging: LogConfig,
}

/// Error policy settings for each reporter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    pub training: ErrorPolicy,
    pub daily: ErrorPolicy,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            training: ErrorPolicy::Strict,
            daily: ErrorPolicy::Lenient,
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TrackerError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::load_from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| TrackerError::Configuration(format!("Invalid TOML syntax: {}", e)))?;
        config.formulas.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_content = self.to_toml()?;
        fs::write(path, toml_content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            TrackerError::Configuration(format!("Failed to serialize configuration: {}", e))
        })
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tracker")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    ///
    /// A missing file is not an error; an invalid one is.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path();
        if !config_path.exists() {
            tracing::debug!("Config file not found, using defaults: {}", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&config_path)
    }

    pub fn training_reporter(&self) -> TrainingReporter {
        TrainingReporter::new(self.formulas.clone()).with_policy(self.policy.training)
    }

    pub fn daily_reporter(&self) -> DailyStepsReporter {
        DailyStepsReporter::new(self.formulas.clone()).with_policy(self.policy.daily)
    }
}
