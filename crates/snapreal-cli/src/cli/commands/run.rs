//! `snapreal run` – sign in, process descriptors, write the CSV.

use anyhow::{Context, Result};
use clap::Args;
use snapreal_core::auth::{self, Credentials};
use snapreal_core::batch::{self, BatchOptions, BatchSummary, FileOutcome, FileReport};
use snapreal_core::config::SnaprealConfig;
use snapreal_core::endpoints::ApiEndpoints;
use snapreal_core::http::HttpClient;
use snapreal_core::snapshots::SnapshotClient;
use std::io;
use std::path::PathBuf;

use super::required_path;
use crate::cli::progress::ProgressObserver;
use crate::cli::prompt;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Folder scanned recursively for *.json descriptors.
    #[arg(long, short = 'i', value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// CSV file to write (overwritten).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Account email; prompted for when absent.
    #[arg(long, env = "SNAPREAL_EMAIL")]
    pub email: Option<String>,

    /// Account password; prompted for when absent.
    #[arg(long, env = "SNAPREAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API base URL (overrides config).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// API version path, e.g. /api/v1 (overrides config).
    #[arg(long, value_name = "PATH")]
    pub api_version: Option<String>,

    /// Attempts per request on transport failure (overrides config).
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Seconds between attempts (overrides config).
    #[arg(long, value_name = "SECS")]
    pub retry_delay: Option<f64>,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Settings for one run after merging flags over the config file.
#[derive(Debug)]
pub(crate) struct RunSettings {
    pub cfg: SnaprealConfig,
    pub batch: BatchOptions,
}

pub(crate) fn resolve_settings(mut cfg: SnaprealConfig, args: &RunArgs) -> Result<RunSettings> {
    if let Some(url) = &args.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(v) = &args.api_version {
        cfg.api_version = v.clone();
    }
    if args.retries.is_some() || args.retry_delay.is_some() {
        let mut retry = cfg.retry.clone().unwrap_or_default();
        if let Some(n) = args.retries {
            retry.max_attempts = n;
        }
        if let Some(d) = args.retry_delay {
            anyhow::ensure!(d >= 0.0 && d.is_finite(), "--retry-delay must be >= 0");
            retry.delay_secs = d;
        }
        cfg.retry = Some(retry);
    }
    let input_dir = required_path(
        args.input_dir.clone(),
        cfg.input_dir.as_ref(),
        "input folder",
        "--input-dir",
        "input_dir",
    )?;
    let output_csv = required_path(
        args.output.clone(),
        cfg.output_csv.as_ref(),
        "output CSV path",
        "--output",
        "output_csv",
    )?;
    Ok(RunSettings {
        cfg,
        batch: BatchOptions {
            input_dir,
            output_csv,
        },
    })
}

fn credentials(args: &RunArgs) -> Result<Credentials> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let email = match &args.email {
        Some(e) => e.clone(),
        None => prompt::prompt_line("Enter email: ", &mut input, &mut out)?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt::prompt_line("Enter password: ", &mut input, &mut out)?,
    };
    Ok(Credentials { email, password })
}

fn print_reports(label: &str, reports: &[FileReport]) {
    if reports.is_empty() {
        return;
    }
    println!("{} ({}):", label, reports.len());
    for r in reports {
        match &r.outcome {
            FileOutcome::Skipped { missing } => {
                println!("  {}: missing {}", r.path.display(), missing.join(", "))
            }
            FileOutcome::Failed { error } => println!("  {}: {}", r.path.display(), error),
            FileOutcome::Matched { .. } => {}
        }
    }
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "Processed {} file(s): {} looked up, {} skipped, {} failed",
        summary.files_scanned,
        summary.files_matched,
        summary.skipped.len(),
        summary.failed.len()
    );
    print_reports("Skipped", &summary.skipped);
    print_reports("Failed", &summary.failed);
    println!(
        "CSV saved to {} ({} row(s))",
        summary.output_csv.display(),
        summary.rows_written
    );
}

pub fn run_batch_command(cfg: SnaprealConfig, args: RunArgs) -> Result<()> {
    let settings = resolve_settings(cfg, &args)?;
    let endpoints = ApiEndpoints::new(&settings.cfg.base_url, &settings.cfg.api_version)?;
    let http = HttpClient::from_config(&settings.cfg);
    let creds = credentials(&args)?;

    println!("Signing in...");
    let token = auth::sign_in(&http, &endpoints.signin_url(), &creds).context("sign in")?;
    println!("Got token");

    let source = SnapshotClient::new(&http, &endpoints, token);
    let mut progress = ProgressObserver::new(!args.no_progress);
    let summary = batch::run_batch(&source, &settings.batch, &mut progress);
    progress.finish();
    print_summary(&summary?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapreal_core::config::RetryConfig;
    use std::path::Path;

    fn args() -> RunArgs {
        RunArgs {
            input_dir: None,
            output: None,
            email: None,
            password: None,
            base_url: None,
            api_version: None,
            retries: None,
            retry_delay: None,
            no_progress: false,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = SnaprealConfig::default();
        cfg.input_dir = Some(PathBuf::from("/cfg/in"));
        cfg.output_csv = Some(PathBuf::from("/cfg/out.csv"));
        let a = RunArgs {
            input_dir: Some(PathBuf::from("/flag/in")),
            base_url: Some("http://localhost:9".into()),
            retries: Some(5),
            ..args()
        };
        let s = resolve_settings(cfg, &a).unwrap();
        assert_eq!(s.batch.input_dir, Path::new("/flag/in"));
        assert_eq!(s.batch.output_csv, Path::new("/cfg/out.csv"));
        assert_eq!(s.cfg.base_url, "http://localhost:9");
        let retry = s.cfg.retry.unwrap();
        assert_eq!(retry.max_attempts, 5);
        assert_eq!(retry.delay_secs, RetryConfig::default().delay_secs);
    }

    #[test]
    fn missing_paths_are_errors() {
        let err = resolve_settings(SnaprealConfig::default(), &args()).unwrap_err();
        assert!(err.to_string().contains("--input-dir"));

        let a = RunArgs {
            input_dir: Some(PathBuf::from("/in")),
            ..args()
        };
        let err = resolve_settings(SnaprealConfig::default(), &a).unwrap_err();
        assert!(err.to_string().contains("output_csv"));
    }

    #[test]
    fn negative_delay_rejected() {
        let a = RunArgs {
            input_dir: Some(PathBuf::from("/in")),
            output: Some(PathBuf::from("/out.csv")),
            retry_delay: Some(-1.0),
            ..args()
        };
        assert!(resolve_settings(SnaprealConfig::default(), &a).is_err());
    }
}
