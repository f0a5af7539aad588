//! Rulepack schema
//!
//! A rulepack is a versioned, ordered list of rules. Each rule names one
//! check kind from a fixed vocabulary together with that kind's typed
//! parameters. Parameters are defaulted and validated here, at load time,
//! so the engine never inspects raw JSON.
//!
//! Check kinds this engine does not know deserialize to
//! [`CheckSpec::Unknown`] instead of failing the load.

use globset::{Glob, GlobMatcher};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// A loaded rulepack
#[derive(Debug, Clone, Deserialize)]
pub struct Rulepack {
    /// Rulepack identity (e.g. "GEO-SEQ-BULK")
    #[serde(default = "default_rulepack_id")]
    pub rulepack_id: String,

    /// Rulepack version (e.g. "0.1.0")
    #[serde(default = "default_rulepack_version")]
    pub rulepack_version: String,

    /// Rules in declaration order
    pub rules: Vec<Rule>,
}

fn default_rulepack_id() -> String {
    "UNKNOWN_RULEPACK".to_string()
}

fn default_rulepack_version() -> String {
    "0.0.0".to_string()
}

impl Rulepack {
    /// Load a rulepack from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, RulepackError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RulepackError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse a rulepack from a JSON string
    pub fn from_str(json: &str) -> Result<Self, RulepackError> {
        let pack: Rulepack = serde_json::from_str(json)
            .map_err(|e| RulepackError::ParseError(e.to_string()))?;

        pack.validate()?;
        Ok(pack)
    }

    /// Rule codes are the identity of a rule and must be unique
    fn validate(&self) -> Result<(), RulepackError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.code.as_str()) {
                return Err(RulepackError::DuplicateCode(rule.code.clone()));
            }
        }
        Ok(())
    }

    /// `rulepack_id@rulepack_version`
    pub fn label(&self) -> String {
        format!("{}@{}", self.rulepack_id, self.rulepack_version)
    }
}

/// A single declarative rule
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Stable finding code, unique within the pack
    pub code: String,

    /// What to check
    pub check: CheckSpec,

    /// Fallback location shown when a finding has no row/column
    #[serde(rename = "where")]
    pub location: String,

    /// Rationale shown to the user
    pub why: String,

    /// Remediation guidance
    pub how_to_fix: String,
}

/// Typed check specification
///
/// Closed set of check kinds. `Unknown` keeps the declared type name so the
/// engine can report what it skipped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawCheck")]
pub enum CheckSpec {
    RequireColumns(RequireColumnsParams),
    AtLeastOneNonEmptyPerRow(NonEmptyGroupParams),
    IdCrosscheck(IdCrosscheckParams),
    PairedEndComplete(PairedEndParams),
    DatesAreIso8601(DateColumnsParams),
    ProcessedDataPresent(ProcessedDataParams),
    Unknown { kind: String },
}

impl CheckSpec {
    /// The `type` string as declared in the rulepack
    pub fn type_name(&self) -> &str {
        match self {
            Self::RequireColumns(_) => "require_columns",
            Self::AtLeastOneNonEmptyPerRow(_) => "at_least_one_nonempty_per_row",
            Self::IdCrosscheck(_) => "id_crosscheck",
            Self::PairedEndComplete(_) => "paired_end_complete",
            Self::DatesAreIso8601(_) => "dates_are_iso8601",
            Self::ProcessedDataPresent(_) => "processed_data_present",
            Self::Unknown { kind } => kind.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown { .. })
    }
}

#[derive(Deserialize)]
struct RawCheck {
    #[serde(rename = "type")]
    kind: String,

    #[serde(flatten)]
    params: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<RawCheck> for CheckSpec {
    type Error = serde_json::Error;

    fn try_from(raw: RawCheck) -> Result<Self, Self::Error> {
        let params = serde_json::Value::Object(raw.params);

        let spec = match raw.kind.as_str() {
            "require_columns" => Self::RequireColumns(serde_json::from_value(params)?),
            "at_least_one_nonempty_per_row" => {
                Self::AtLeastOneNonEmptyPerRow(serde_json::from_value(params)?)
            }
            "id_crosscheck" => Self::IdCrosscheck(serde_json::from_value(params)?),
            "paired_end_complete" => Self::PairedEndComplete(serde_json::from_value(params)?),
            "dates_are_iso8601" => Self::DatesAreIso8601(serde_json::from_value(params)?),
            "processed_data_present" => Self::ProcessedDataPresent(serde_json::from_value(params)?),
            _ => Self::Unknown { kind: raw.kind },
        };

        Ok(spec)
    }
}

/// Parameters for `require_columns`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RequireColumnsParams {
    #[serde(default)]
    pub required_columns: Vec<String>,
}

/// Parameters for `at_least_one_nonempty_per_row`
///
/// Each group is checked independently, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NonEmptyGroupParams {
    #[serde(default)]
    pub column_groups: Vec<Vec<String>>,
}

/// Parameters for `id_crosscheck`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdCrosscheckParams {
    /// Sample identifier column in the samples sheet
    #[serde(default = "default_sample_key")]
    pub left_key: String,

    /// Sample identifier column in the files sheet (defaults to `left_key`)
    #[serde(default)]
    pub right_key: Option<String>,
}

impl IdCrosscheckParams {
    pub fn right_key(&self) -> &str {
        self.right_key.as_deref().unwrap_or(&self.left_key)
    }
}

impl Default for IdCrosscheckParams {
    fn default() -> Self {
        Self {
            left_key: default_sample_key(),
            right_key: None,
        }
    }
}

/// Parameters for `paired_end_complete`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PairedEndParams {
    #[serde(default = "default_sample_key")]
    pub samples_key: String,

    #[serde(default = "default_layout_column")]
    pub layout_column: String,

    #[serde(default = "default_paired_value", rename = "layout_value_for_paired")]
    pub paired_value: String,

    #[serde(default = "default_file_column")]
    pub file_column: String,

    #[serde(default = "default_r1_pattern")]
    pub r1_pattern: FilePattern,

    #[serde(default = "default_r2_pattern")]
    pub r2_pattern: FilePattern,
}

impl Default for PairedEndParams {
    fn default() -> Self {
        Self {
            samples_key: default_sample_key(),
            layout_column: default_layout_column(),
            paired_value: default_paired_value(),
            file_column: default_file_column(),
            r1_pattern: default_r1_pattern(),
            r2_pattern: default_r2_pattern(),
        }
    }
}

/// Parameters for `dates_are_iso8601`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DateColumnsParams {
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Parameters for `processed_data_present`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessedDataParams {
    #[serde(default = "default_sample_key")]
    pub samples_key: String,

    #[serde(default = "default_file_column")]
    pub file_column: String,

    #[serde(default = "default_raw_glob")]
    pub raw_file_glob: FileGlob,

    #[serde(default = "default_processed_globs", rename = "processed_glob_candidates")]
    pub processed_globs: Vec<FileGlob>,
}

impl Default for ProcessedDataParams {
    fn default() -> Self {
        Self {
            samples_key: default_sample_key(),
            file_column: default_file_column(),
            raw_file_glob: default_raw_glob(),
            processed_globs: default_processed_globs(),
        }
    }
}

fn default_sample_key() -> String {
    "sample_id".to_string()
}

fn default_layout_column() -> String {
    "layout".to_string()
}

fn default_paired_value() -> String {
    "PAIRED".to_string()
}

fn default_file_column() -> String {
    "filename".to_string()
}

fn default_r1_pattern() -> FilePattern {
    FilePattern::Literal("_R1".to_string())
}

fn default_r2_pattern() -> FilePattern {
    FilePattern::Literal("_R2".to_string())
}

fn default_raw_glob() -> FileGlob {
    FileGlob::Substring(".fastq".to_string())
}

fn default_processed_globs() -> Vec<FileGlob> {
    [".counts", ".quant", ".gene_counts"]
        .into_iter()
        .map(|s| FileGlob::Substring(s.to_string()))
        .collect()
}

/// A filename pattern searched anywhere in the name
///
/// Plain strings match as substrings; anything with regex metacharacters is
/// compiled as a regular expression.
#[derive(Debug, Clone)]
pub enum FilePattern {
    Literal(String),
    Regex(Regex),
}

impl FilePattern {
    pub fn is_match(&self, filename: &str) -> bool {
        match self {
            Self::Literal(s) => filename.contains(s.as_str()),
            Self::Regex(re) => re.is_match(filename),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) => s,
            Self::Regex(re) => re.as_str(),
        }
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for FilePattern {
    type Error = regex::Error;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        const META: &[char] = &['\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$'];

        if pattern.contains(META) {
            Ok(Self::Regex(Regex::new(&pattern)?))
        } else {
            Ok(Self::Literal(pattern))
        }
    }
}

impl<'de> Deserialize<'de> for FilePattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

/// A filename selector for raw/processed files
///
/// Shell globs (`*`, `?`, `[`) match the whole filename; anything else is a
/// substring match, so `.fastq` also selects `S1_R1.fastq.gz`.
#[derive(Debug, Clone)]
pub enum FileGlob {
    Substring(String),
    Glob(GlobMatcher),
}

impl FileGlob {
    pub fn is_match(&self, filename: &str) -> bool {
        match self {
            Self::Substring(s) => filename.contains(s.as_str()),
            Self::Glob(m) => m.is_match(filename),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Substring(s) => s,
            Self::Glob(m) => m.glob().glob(),
        }
    }
}

impl PartialEq for FileGlob {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for FileGlob {
    type Error = globset::Error;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        if pattern.contains(&['*', '?', '['][..]) {
            Ok(Self::Glob(Glob::new(&pattern)?.compile_matcher()))
        } else {
            Ok(Self::Substring(pattern))
        }
    }
}

impl<'de> Deserialize<'de> for FileGlob {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

/// Rulepack error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulepackError {
    #[error("Failed to read rulepack file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse rulepack JSON: {0}")]
    ParseError(String),

    #[error("Duplicate rule code '{0}' in rulepack")]
    DuplicateCode(String),
}
