use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fairy_core::Config;
use fairy_engine::run_rulepack;

mod history;
mod render;

use history::{HistoryStore, Resolution};
use render::{generate_markdown_report, print_preflight_summary};

/// FAIRy - Pre-submission compliance checks for sequencing metadata
#[derive(Parser)]
#[command(name = "fairy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: fairy.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check samples.tsv and files.tsv against a rulepack
    Preflight {
        /// Rulepack JSON (default: `rulepack` from fairy.toml)
        #[arg(short, long)]
        rulepack: Option<PathBuf>,

        /// Samples sheet (tab-delimited)
        #[arg(short, long)]
        samples: PathBuf,

        /// Files sheet (tab-delimited)
        #[arg(short, long)]
        files: PathBuf,

        /// Output file for the JSON report
        #[arg(short, long, default_value = "report.json")]
        out: PathBuf,

        /// Version string embedded in the attestation
        #[arg(long)]
        fairy_version: Option<String>,

        /// Skip the Markdown one-pager
        #[arg(long)]
        no_markdown: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Preflight { rulepack, samples, files, out, fairy_version, no_markdown } => {
            let rulepack = rulepack
                .or_else(|| config.rulepack_path())
                .context("No rulepack given: pass --rulepack or set `rulepack` in fairy.toml")?;
            let fairy_version = fairy_version
                .or_else(|| config.fairy_version.clone())
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

            preflight_command(
                &config,
                &PreflightArgs {
                    rulepack,
                    samples,
                    files,
                    out,
                    fairy_version,
                    markdown: config.report.markdown && !no_markdown,
                },
                cli.verbose,
            )
        }
    }
}

/// `--config`, else `./fairy.toml` if present, else defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if Path::new("fairy.toml").exists() {
        Config::from_file(Path::new("fairy.toml")).context("Failed to load fairy.toml")?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    Ok(config)
}

struct PreflightArgs {
    rulepack: PathBuf,
    samples: PathBuf,
    files: PathBuf,
    out: PathBuf,
    fairy_version: String,
    markdown: bool,
}

/// Preflight command - run the rulepack and write every report artifact
///
/// Returns the process exit code: 0 when the submission is ready, 1 otherwise.
fn preflight_command(config: &Config, args: &PreflightArgs, verbose: bool) -> Result<i32> {
    if verbose {
        eprintln!("{} {}", "Using rulepack:".cyan(), args.rulepack.display());
    }

    let preflight = run_rulepack(&args.rulepack, &args.samples, &args.files, &args.fairy_version)
        .context("Preflight failed")?;
    let report = &preflight.report;

    report
        .save_to_file(&args.out)
        .with_context(|| format!("Failed to write report {}", args.out.display()))?;
    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), args.out.display());
    }

    let resolution = if config.report.track_resolved {
        let store = HistoryStore::new(config.report.history_path(&args.out));
        record_history(&store, &args.out, &report.codes())
    } else {
        Resolution::Disabled
    };

    if args.markdown {
        let md_path = markdown_path(&args.out);
        std::fs::write(&md_path, generate_markdown_report(report, &resolution))
            .with_context(|| format!("Failed to write {}", md_path.display()))?;
        if verbose {
            eprintln!("{} {}", "Markdown report saved to:".green(), md_path.display());
        }
    }

    print_preflight_summary(report, &args.out, &resolution, &preflight.skipped);

    Ok(if report.is_submission_ready() { 0 } else { 1 })
}

/// Update the history store for this report
///
/// The store is bookkeeping only: if it cannot be written the run carries on
/// without a baseline.
fn record_history(store: &HistoryStore, report_path: &Path, codes: &BTreeSet<String>) -> Resolution {
    let key = report_path.display().to_string();

    match store.record(&key, codes) {
        Ok(resolution) => resolution,
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "could not update history store");
            Resolution::NoBaseline
        }
    }
}

/// Markdown one-pager path for a report written to `out`
///
/// The extension is swapped for `.md`, unless `out` already ends in `.md`,
/// in which case `.md` is appended so the JSON report is never overwritten.
fn markdown_path(out: &Path) -> PathBuf {
    if out.extension().is_some_and(|ext| ext == "md") {
        let mut name = out.as_os_str().to_os_string();
        name.push(".md");
        PathBuf::from(name)
    } else {
        out.with_extension("md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_preflight_flags() {
        let cli = Cli::try_parse_from([
            "fairy",
            "preflight",
            "--rulepack",
            "rp.json",
            "--samples",
            "s.tsv",
            "--files",
            "f.tsv",
            "--no-markdown",
        ])
        .unwrap();

        match cli.command {
            Commands::Preflight { rulepack, out, no_markdown, fairy_version, .. } => {
                assert_eq!(rulepack, Some(PathBuf::from("rp.json")));
                assert_eq!(out, PathBuf::from("report.json"));
                assert!(no_markdown);
                assert!(fairy_version.is_none());
            }
        }
    }

    #[test]
    fn test_version_flag_prints_binary_version() {
        let err = match Cli::try_parse_from(["fairy", "--version"]) {
            Ok(_) => panic!("--version should short-circuit parsing"),
            Err(e) => e,
        };

        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_markdown_path_never_overwrites_report() {
        assert_eq!(markdown_path(Path::new("out/report.json")), PathBuf::from("out/report.md"));
        assert_eq!(markdown_path(Path::new("out/report")), PathBuf::from("out/report.md"));
        assert_eq!(markdown_path(Path::new("out/report.md")), PathBuf::from("out/report.md.md"));
    }

    #[test]
    fn test_unwritable_history_is_no_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("hist");
        std::fs::create_dir(&blocked).unwrap();
        let store = HistoryStore::new(&blocked);
        let codes: BTreeSet<String> = ["A".to_string()].into_iter().collect();

        let resolution = record_history(&store, Path::new("out/report.json"), &codes);

        assert_eq!(resolution, Resolution::NoBaseline);
    }
}
