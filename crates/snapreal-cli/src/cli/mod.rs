//! CLI for snapreal.

mod commands;
mod progress;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snapreal_core::config::{self, SnaprealConfig};
use std::path::{Path, PathBuf};

use commands::{run_batch_command, run_scan, RunArgs};

/// Top-level CLI for snapreal.
#[derive(Debug, Parser)]
#[command(name = "snapreal")]
#[command(
    about = "Export active realities of snapshot descriptors to CSV",
    long_about = None
)]
pub struct Cli {
    /// Use this config file instead of ~/.config/snapreal/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sign in, look up every descriptor under the input folder, and write the CSV.
    Run(RunArgs),

    /// List descriptor files and whether they parse, without contacting the API.
    Scan {
        /// Folder scanned recursively for *.json descriptors.
        #[arg(long, short = 'i', value_name = "DIR")]
        input_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<SnaprealConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run(args) => run_batch_command(cfg, args)?,
            CliCommand::Scan { input_dir } => {
                run_scan(&cfg, input_dir)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
