//! Batch driver: scan descriptors, look up active realities, write one CSV.
//!
//! Files are processed sequentially in scan order. A failure in one file is
//! recorded in its `FileOutcome` and never aborts the batch. The CSV is written
//! once, after every file has been processed.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::descriptor::{read_descriptor, DescriptorError};
use crate::report::{self, ResultRow};
use crate::scan;
use crate::snapshots::RealitySource;

/// Where to read descriptors and where to write the CSV.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_csv: PathBuf,
}

/// What happened to one descriptor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Looked up; `rows` active realities found (may be 0).
    Matched { rows: usize },
    /// Required identifiers missing; nothing requested.
    Skipped { missing: Vec<&'static str> },
    /// Unreadable/invalid file or API failure.
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub files_scanned: usize,
    pub files_matched: usize,
    pub rows_written: usize,
    pub output_csv: PathBuf,
    pub skipped: Vec<FileReport>,
    pub failed: Vec<FileReport>,
}

/// Progress hooks, called synchronously from the batch loop.
pub trait BatchObserver {
    fn on_start(&mut self, _total_files: usize) {}
    fn on_file(&mut self, _report: &FileReport) {}
}

/// Observer that ignores every event.
pub struct NoProgress;

impl BatchObserver for NoProgress {}

/// Process one descriptor file into rows. Never returns Err: every failure is
/// folded into the outcome.
pub fn process_file<S: RealitySource + ?Sized>(
    source: &S,
    path: &Path,
) -> (Vec<ResultRow>, FileOutcome) {
    let descriptor = match read_descriptor(path) {
        Ok(d) => d,
        Err(DescriptorError::MissingFields(missing)) => {
            tracing::warn!("Skipping {}: missing fields {}", path.display(), missing.join(", "));
            return (Vec::new(), FileOutcome::Skipped { missing });
        }
        Err(e) => {
            tracing::warn!("Error processing {}: {}", path.display(), e);
            return (
                Vec::new(),
                FileOutcome::Failed {
                    error: e.to_string(),
                },
            );
        }
    };

    match source.active_realities(&descriptor) {
        Ok(ids) => {
            let rows: Vec<ResultRow> = ids
                .into_iter()
                .map(|id| ResultRow::new(&descriptor, id))
                .collect();
            tracing::debug!(file = %path.display(), %descriptor, rows = rows.len(), "processed");
            let outcome = FileOutcome::Matched { rows: rows.len() };
            (rows, outcome)
        }
        Err(e) => {
            tracing::warn!("Error processing {} ({}): {}", path.display(), descriptor, e);
            (
                Vec::new(),
                FileOutcome::Failed {
                    error: e.to_string(),
                },
            )
        }
    }
}

/// Process `files` in order, accumulating rows and per-file reports.
pub fn collect_rows<S, O>(
    source: &S,
    files: &[PathBuf],
    observer: &mut O,
) -> (Vec<ResultRow>, Vec<FileReport>)
where
    S: RealitySource + ?Sized,
    O: BatchObserver + ?Sized,
{
    observer.on_start(files.len());
    let mut rows = Vec::new();
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let (file_rows, outcome) = process_file(source, path);
        rows.extend(file_rows);
        let report = FileReport {
            path: path.clone(),
            outcome,
        };
        observer.on_file(&report);
        reports.push(report);
    }
    (rows, reports)
}

/// Scan `opts.input_dir`, process every descriptor, then write `opts.output_csv`.
///
/// Errors only for a bad input folder or an unwritable CSV; per-file problems
/// are reported in the summary.
pub fn run_batch<S, O>(source: &S, opts: &BatchOptions, observer: &mut O) -> Result<BatchSummary>
where
    S: RealitySource + ?Sized,
    O: BatchObserver + ?Sized,
{
    let files = scan::find_descriptor_files(&opts.input_dir)?;
    tracing::info!(
        files = files.len(),
        "processing descriptors under {}",
        opts.input_dir.display()
    );
    let (rows, reports) = collect_rows(source, &files, observer);
    report::write_csv(&opts.output_csv, &rows)?;

    let mut summary = BatchSummary {
        files_scanned: files.len(),
        rows_written: rows.len(),
        output_csv: opts.output_csv.clone(),
        ..Default::default()
    };
    for report in reports {
        match report.outcome {
            FileOutcome::Matched { .. } => summary.files_matched += 1,
            FileOutcome::Skipped { .. } => summary.skipped.push(report),
            FileOutcome::Failed { .. } => summary.failed.push(report),
        }
    }
    tracing::info!(
        scanned = summary.files_scanned,
        matched = summary.files_matched,
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        rows = summary.rows_written,
        "batch complete"
    );
    Ok(summary)
}
