//! Well-Test Configuration - reservoir constants and run options as TOML
//!
//! The library's analysis functions never read this module; the CLI resolves
//! a config once and passes plain values into the pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::ReservoirProperties;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WELLTEST_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "welltest.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one well test.
///
/// Load with `WellTestConfig::load()` which searches:
/// 1. An explicit path (the `--config` flag)
/// 2. `$WELLTEST_CONFIG`
/// 3. `./welltest.toml`
///
/// There are no built-in reservoir defaults; `[reservoir]` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellTestConfig {
    #[serde(default)]
    pub well: WellInfo,

    /// Rock, fluid and wellbore properties
    pub reservoir: ReservoirConfig,

    /// Constant-rate drawdown settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawdown: Option<DrawdownConfig>,

    /// Constant-pressure test settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_pressure: Option<ConstantPressureConfig>,

    #[serde(default)]
    pub output: OutputConfig,
}

impl WellTestConfig {
    /// Resolve and load the config using the standard search order.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Explicit path: failures are fatal, no fallback
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), well = %config.well.name, "Loaded well-test config");
            return Ok(config);
        }

        let mut searched = Vec::new();

        // 2. Env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                let config = Self::load_from_file(&p)?;
                info!(path = %p.display(), well = %config.well.name, "Loaded well-test config from {}", CONFIG_ENV_VAR);
                return Ok(config);
            }
            warn!(path = %path, "{} points to non-existent file, continuing search", CONFIG_ENV_VAR);
            searched.push(p);
        }

        // 3. ./welltest.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!(well = %config.well.name, "Loaded well-test config from ./{}", LOCAL_CONFIG_FILE);
            return Ok(config);
        }
        searched.push(local);

        Err(ConfigError::NotFound(searched))
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys only warn; parse and range errors fail.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Well-test config saved");
        Ok(())
    }

    /// Run the physical range checks. Errors fail, warnings are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Example configuration written by `welltest init-config`.
    pub fn template() -> Self {
        Self {
            well: WellInfo {
                name: "Well-1".to_string(),
                field: "Example Field".to_string(),
            },
            reservoir: ReservoirConfig {
                formation_volume_factor: 1.2,
                viscosity_cp: 0.8,
                thickness_ft: 50.0,
                porosity: 0.2,
                total_compressibility_per_psi: 1e-5,
                wellbore_radius_ft: 0.3,
                initial_pressure_psia: 5000.0,
            },
            drawdown: Some(DrawdownConfig {
                rate_stb_d: Some(250.0),
                boundary_index: Some(17),
            }),
            constant_pressure: Some(ConstantPressureConfig {
                flowing_pressure_psia: Some(3000.0),
            }),
            output: OutputConfig::default(),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well name / identifier
    #[serde(default = "default_well_name")]
    pub name: String,

    /// Field name
    #[serde(default)]
    pub field: String,
}

fn default_well_name() -> String {
    "Unnamed".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
        }
    }
}

/// `[reservoir]` section, field units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirConfig {
    /// Bo (rb/STB)
    pub formation_volume_factor: f64,
    pub viscosity_cp: f64,
    pub thickness_ft: f64,
    /// Fraction, 0-1
    pub porosity: f64,
    pub total_compressibility_per_psi: f64,
    pub wellbore_radius_ft: f64,
    pub initial_pressure_psia: f64,
}

impl ReservoirConfig {
    pub fn to_properties(&self) -> ReservoirProperties {
        ReservoirProperties {
            formation_volume_factor: self.formation_volume_factor,
            viscosity_cp: self.viscosity_cp,
            thickness_ft: self.thickness_ft,
            porosity: self.porosity,
            total_compressibility: self.total_compressibility_per_psi,
            wellbore_radius_ft: self.wellbore_radius_ft,
            initial_pressure_psia: self.initial_pressure_psia,
        }
    }
}

/// `[drawdown]` section. CLI flags take precedence over both fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawdownConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_stb_d: Option<f64>,
    /// Last sample index of the middle-time region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_index: Option<usize>,
}

/// `[constant_pressure]` section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstantPressureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowing_pressure_psia: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Full result record as JSON
    Json,
}

/// `[output]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places in the text report
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    3
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("No well-test config found (searched: {}); pass --config or set {}", display_paths(.0), CONFIG_ENV_VAR)]
    NotFound(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
