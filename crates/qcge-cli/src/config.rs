//! Configuration for the qcge host.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config`)
//! 2. Environment variables (with QCGE_ prefix)
//!
//! Environment variables take precedence over the file, which takes
//! precedence over the defaults.

use std::f64::consts::PI;
use std::path::Path;

use qcge_grid::{CompileOptions, ControlledRotation};
use serde::{Deserialize, Serialize};

/// Complete editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Grid dimensions for new sessions
    #[serde(default)]
    pub grid: GridConfig,

    /// Angle in radians applied by `rotate +` and `rotate -`
    #[serde(default = "default_rotation_step")]
    pub rotation_step: f64,

    /// Compiler options
    #[serde(default)]
    pub compile: CompileOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_num_qubits")]
    pub num_qubits: usize,

    #[serde(default = "default_num_columns")]
    pub num_columns: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_num_qubits() -> usize {
    3
}

fn default_num_columns() -> usize {
    8
}

fn default_rotation_step() -> f64 {
    PI / 8.0
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            grid: GridConfig::default(),
            rotation_step: default_rotation_step(),
            compile: CompileOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            num_qubits: default_num_qubits(),
            num_columns: default_num_columns(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;

        let config: EditorConfig =
            serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            EditorConfig::default()
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `QCGE_*` environment variables into this configuration.
    fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(std::env::vars())
    }

    /// Merge overrides from `(name, value)` pairs. Unknown names are ignored;
    /// a known name with an unparsable value is a validation error.
    pub fn merge_vars<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in vars {
            let (name, value) = (name.as_ref(), value.as_ref().trim());
            match name {
                "QCGE_NUM_QUBITS" => self.grid.num_qubits = parse_var(name, value)?,
                "QCGE_NUM_COLUMNS" => self.grid.num_columns = parse_var(name, value)?,
                "QCGE_ROTATION_STEP" => self.rotation_step = parse_var(name, value)?,
                "QCGE_LOG_LEVEL" => self.logging.level = value.to_ascii_lowercase(),
                "QCGE_CONTROLLED_ROTATION" => {
                    self.compile.controlled_rotation = match value.to_ascii_lowercase().as_str() {
                        "discard" => ControlledRotation::Discard,
                        "controlled" => ControlledRotation::Controlled,
                        other => {
                            return Err(ConfigError::Validation(format!(
                                "Invalid {name}: {other} (expected discard or controlled)"
                            )));
                        }
                    };
                }
                _ => {}
            }
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.num_qubits == 0 || self.grid.num_columns == 0 {
            return Err(ConfigError::Validation(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.num_qubits, self.grid.num_columns
            )));
        }

        if !self.rotation_step.is_finite() || self.rotation_step == 0.0 {
            return Err(ConfigError::Validation(format!(
                "rotation_step must be finite and nonzero, got {}",
                self.rotation_step
            )));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Validation(format!("Invalid {name}: {value}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
