//! FAIRy engine - Rule evaluation
//!
//! This crate turns a rulepack plus two sheets into a report:
//! - Check library (one pure function per check kind)
//! - Rule dispatch in rulepack order
//! - Finding mapping
//! - Attestation and readiness verdict

pub mod attestation;
pub mod checks;
pub mod dispatch;
pub mod mapper;
pub mod runner;

pub use attestation::{build_attestation, build_report, RunContext};
pub use dispatch::{dispatch, run_check, Dispatch, RuleOutcome, SkippedRule};
pub use mapper::{describe_location, map_finding};
pub use runner::{evaluate, run_rulepack, EngineError, Preflight};
