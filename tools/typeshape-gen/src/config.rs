// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Supports both programmatic and file-based configuration. Command-line
//! flags are layered on top of a loaded file in `main`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Extraction run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Go source files to scan.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// JSON sample to infer records from, instead of Go inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<PathBuf>,

    /// Root struct names. Empty with `all_structs` set means every struct.
    /// With `json` set, the first root names the top-level record.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Use every struct found in the inputs as a root.
    #[serde(default)]
    pub all_structs: bool,

    /// Output file; stdout when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Indent the JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Include the diagnostics list next to the schema in the output.
    #[serde(default = "default_true")]
    pub include_diagnostics: bool,

    /// Exit with a failure status when any diagnostic is raised.
    #[serde(default)]
    pub fail_on_diagnostics: bool,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            json: None,
            roots: Vec::new(),
            all_structs: false,
            output: None,
            pretty: true,
            include_diagnostics: true,
            fail_on_diagnostics: false,
            log_level: default_log_level(),
        }
    }
}

impl GenConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// Relative input and output paths are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file without validating it, so more settings can be
    /// layered on before [`validate`](Self::validate) runs.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        if let Some(base) = path.parent() {
            config.inputs = config.inputs.iter().map(|p| base.join(p)).collect();
            config.json = config.json.as_ref().map(|p| base.join(p));
            config.output = config.output.as_ref().map(|p| base.join(p));
        }

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.json.is_some() {
            if !self.inputs.is_empty() {
                return Err(ConfigError::Invalid(
                    "`inputs` and `json` cannot be used together".into(),
                ));
            }
            if self.all_structs {
                return Err(ConfigError::Invalid(
                    "`all_structs` does not apply to a JSON sample".into(),
                ));
            }
        } else if self.inputs.is_empty() {
            return Err(ConfigError::Invalid("No input files configured".into()));
        }

        if self.json.is_none() && self.roots.is_empty() && !self.all_structs {
            return Err(ConfigError::Invalid(
                "No roots configured (set `roots` or `all_structs`)".into(),
            ));
        }

        for (i, root) in self.roots.iter().enumerate() {
            if root.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("Root {} is empty", i)));
            }
        }

        Ok(())
    }

    /// Example configuration, as written by `gen-config`.
    pub fn example() -> Self {
        Self {
            inputs: vec![PathBuf::from("models/user.go"), PathBuf::from("models/team.go")],
            roots: vec!["User".into(), "Team".into()],
            output: Some(PathBuf::from("schema/models.json")),
            ..Default::default()
        }
    }

    /// Render as commented TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!(
            "# typeshape-gen configuration\n# Generated by typeshape-gen gen-config\n\n{}",
            body
        ))
    }
}
