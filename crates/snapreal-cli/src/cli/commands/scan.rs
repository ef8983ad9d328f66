//! `snapreal scan` – offline check of descriptor files.

use anyhow::Result;
use snapreal_core::config::SnaprealConfig;
use snapreal_core::descriptor::{read_descriptor, DescriptorError};
use snapreal_core::scan::find_descriptor_files;
use std::path::PathBuf;

use super::required_path;

/// Per-status file counts from one scan.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanCounts {
    pub ok: usize,
    pub skipped: usize,
    pub invalid: usize,
}

pub fn run_scan(cfg: &SnaprealConfig, input_dir: Option<PathBuf>) -> Result<ScanCounts> {
    let root = required_path(
        input_dir,
        cfg.input_dir.as_ref(),
        "input folder",
        "--input-dir",
        "input_dir",
    )?;
    let files = find_descriptor_files(&root)?;
    let mut counts = ScanCounts::default();
    for path in &files {
        match read_descriptor(path) {
            Ok(d) => {
                counts.ok += 1;
                println!("  {:<8}  {}  {}", "ok", path.display(), d);
            }
            Err(DescriptorError::MissingFields(missing)) => {
                counts.skipped += 1;
                println!(
                    "  {:<8}  {}  missing {}",
                    "skipped",
                    path.display(),
                    missing.join(", ")
                );
            }
            Err(e) => {
                counts.invalid += 1;
                println!("  {:<8}  {}  {}", "invalid", path.display(), e);
            }
        }
    }
    println!(
        "{} descriptor file(s): {} ok, {} skipped, {} invalid",
        files.len(),
        counts.ok,
        counts.skipped,
        counts.invalid
    );
    Ok(counts)
}
