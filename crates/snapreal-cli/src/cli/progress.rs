//! Progress bar over descriptor files.

use indicatif::{ProgressBar, ProgressStyle};
use snapreal_core::batch::{BatchObserver, FileReport};

pub struct ProgressObserver {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_start(&mut self, total_files: usize) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(
            ProgressStyle::with_template("Processing Snapshots {wide_bar:.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        self.bar = Some(bar);
    }

    fn on_file(&mut self, report: &FileReport) {
        if let Some(bar) = &self.bar {
            if let Some(name) = report.path.file_name() {
                bar.set_message(name.to_string_lossy().into_owned());
            }
            bar.inc(1);
        }
    }
}
