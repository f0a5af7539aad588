//! FAIRy Core
//!
//! Core domain model with stable, versioned types.
//! Never rename finding fields or severity strings - they are part of the
//! report contract consumed by curators and CI.

pub mod warning;
pub mod finding;
pub mod rulepack;
pub mod report;
pub mod config;

pub use warning::{WarningItem, WarningKind, IssueSeverity};
pub use finding::{Finding, FindingDetails, FindingSeverity};
pub use rulepack::{
    Rulepack, Rule, CheckSpec, RulepackError, FilePattern, FileGlob,
    RequireColumnsParams, NonEmptyGroupParams, IdCrosscheckParams,
    PairedEndParams, DateColumnsParams, ProcessedDataParams,
};
pub use report::{Report, Attestation, Inputs, InputProvenance};
pub use config::{Config, ConfigError, ReportConfig};
