//! Tests for the run subcommand.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    let cli = parse(&["snapreal", "run"]);
    assert!(cli.config.is_none());
    match cli.command {
        CliCommand::Run(args) => {
            assert!(args.input_dir.is_none());
            assert!(args.output.is_none());
            assert!(args.retries.is_none());
            assert!(!args.no_progress);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_paths_and_overrides() {
    let cli = parse(&[
        "snapreal",
        "run",
        "-i",
        "/data/in",
        "--output",
        "/data/out.csv",
        "--base-url",
        "http://localhost:8080",
        "--api-version",
        "/api/v2",
        "--retries",
        "5",
        "--retry-delay",
        "0.5",
        "--no-progress",
    ]);
    match cli.command {
        CliCommand::Run(args) => {
            assert_eq!(args.input_dir.as_deref(), Some(Path::new("/data/in")));
            assert_eq!(args.output.as_deref(), Some(Path::new("/data/out.csv")));
            assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080"));
            assert_eq!(args.api_version.as_deref(), Some("/api/v2"));
            assert_eq!(args.retries, Some(5));
            assert_eq!(args.retry_delay, Some(0.5));
            assert!(args.no_progress);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_credentials_flags() {
    let cli = parse(&[
        "snapreal",
        "run",
        "--email",
        "a@b.c",
        "--password",
        "pw",
    ]);
    match cli.command {
        CliCommand::Run(args) => {
            assert_eq!(args.email.as_deref(), Some("a@b.c"));
            assert_eq!(args.password.as_deref(), Some("pw"));
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_global_config() {
    let cli = parse(&["snapreal", "run", "--config", "/etc/snapreal.toml"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/snapreal.toml")));
}
