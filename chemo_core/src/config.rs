//! Configuration file support for ChemoCalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/chemocalc/config.toml`.
//! It only supplies regimen defaults and export settings; nothing here is
//! read implicitly by the calculation itself.

use crate::{DoseInputs, Error, Result, ScheduleMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub regimen: RegimenConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Default regimen used when a value is not given on the command line
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegimenConfig {
    #[serde(default = "default_bsa")]
    pub bsa: f64,

    #[serde(default = "default_mg_per_m2_day")]
    pub mg_per_m2_day: f64,

    #[serde(default = "default_days")]
    pub days: u32,

    #[serde(default = "default_tablet_size_mg")]
    pub tablet_size_mg: f64,

    #[serde(default)]
    pub mode: ScheduleMode,
}

impl Default for RegimenConfig {
    fn default() -> Self {
        Self {
            bsa: default_bsa(),
            mg_per_m2_day: default_mg_per_m2_day(),
            days: default_days(),
            tablet_size_mg: default_tablet_size_mg(),
            mode: ScheduleMode::default(),
        }
    }
}

impl RegimenConfig {
    /// Validated dose inputs for this regimen
    pub fn dose_inputs(&self) -> Result<DoseInputs> {
        DoseInputs::new(self.bsa, self.mg_per_m2_day, self.days, self.tablet_size_mg)
    }
}

/// Document export settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Calendar days per row
    #[serde(default = "default_columns")]
    pub columns: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            columns: default_columns(),
        }
    }
}

// Default value functions
fn default_bsa() -> f64 {
    1.70
}

fn default_mg_per_m2_day() -> f64 {
    50.0
}

fn default_days() -> u32 {
    21
}

fn default_tablet_size_mg() -> f64 {
    50.0
}

fn default_title() -> String {
    "Chemotherapy Calculator Calendar".into()
}

fn default_columns() -> usize {
    7
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("chemocalc").join("config.toml"))
    }

    /// Check that the regimen defaults and export settings are usable
    pub fn validate(&self) -> Result<()> {
        self.regimen
            .dose_inputs()
            .map_err(|e| Error::Config(format!("invalid [regimen] defaults: {}", e)))?;
        if self.export.columns == 0 {
            return Err(Error::Config(
                "[export] columns must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
