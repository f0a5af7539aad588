//! Resolved-since-last-run tracking
//!
//! The store is a small JSON file mapping a run identity (the report path)
//! to the finding codes that run produced. Each preflight reads the previous
//! entry for its key and then overwrites it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    runs: BTreeMap<String, RunRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RunRecord {
    codes: Vec<String>,
}

/// Outcome of comparing this run against the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Tracking turned off in `fairy.toml`
    Disabled,

    /// First run for this report, or the store was unreadable
    NoBaseline,

    /// Codes present last time and gone now (possibly empty), sorted
    Resolved(Vec<String>),
}

impl Resolution {
    pub fn between(previous: Option<&BTreeSet<String>>, current: &BTreeSet<String>) -> Self {
        match previous {
            None => Self::NoBaseline,
            Some(prev) => Self::Resolved(prev.difference(current).cloned().collect()),
        }
    }
}

/// File-backed history of finding codes per report
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Codes recorded for `key` by the previous run
    ///
    /// A missing or corrupt store means no baseline rather than an error.
    pub fn load(&self, key: &str) -> Option<BTreeSet<String>> {
        let file = self.read()?;
        file.runs.get(key).map(|r| r.codes.iter().cloned().collect())
    }

    /// Replace the codes recorded for `key`, keeping other keys intact
    pub fn save(&self, key: &str, codes: &BTreeSet<String>) -> Result<()> {
        let mut file = self.read().unwrap_or_default();
        file.runs.insert(
            key.to_string(),
            RunRecord { codes: codes.iter().cloned().collect() },
        );

        let json = serde_json::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file {}", self.path.display()))?;

        Ok(())
    }

    /// Read the previous codes for `key`, then record `current` in their place
    pub fn record(&self, key: &str, current: &BTreeSet<String>) -> Result<Resolution> {
        let previous = self.load(key);
        self.save(key, current)?;
        Ok(Resolution::between(previous.as_ref(), current))
    }

    fn read(&self) -> Option<HistoryFile> {
        let contents = std::fs::read_to_string(&self.path).ok()?;

        match serde_json::from_str(&contents) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable history file"
                );
                None
            }
        }
    }
}
