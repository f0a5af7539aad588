//! Configuration schema (fairy.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Write a Markdown one-pager next to the JSON report
    #[serde(default = "default_true")]
    pub markdown: bool,

    /// Track which finding codes were resolved since the previous run
    #[serde(default = "default_true")]
    pub track_resolved: bool,

    /// History store file name, relative to the report directory
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

fn default_true() -> bool {
    true
}

fn default_history_file() -> String {
    ".fairy_last_run.json".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            markdown: true,
            track_resolved: true,
            history_file: default_history_file(),
        }
    }
}

impl ReportConfig {
    /// Resolve the history store path for a report written to `report_path`
    pub fn history_path(&self, report_path: &Path) -> PathBuf {
        match report_path.parent() {
            Some(dir) => dir.join(&self.history_file),
            None => PathBuf::from(&self.history_file),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default rulepack used when none is given on the command line
    #[serde(default)]
    pub rulepack: Option<PathBuf>,

    /// Engine version embedded in attestations (defaults to the build version)
    #[serde(default)]
    pub fairy_version: Option<String>,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Directory of the config file (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Configured rulepack, resolved against the config file's directory
    pub fn rulepack_path(&self) -> Option<PathBuf> {
        self.rulepack.as_ref().map(|p| {
            if p.is_relative() {
                self.project_root.join(p)
            } else {
                p.clone()
            }
        })
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
