//! Recursive discovery of descriptor files.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// All regular files under `root` with a `.json` extension (any case),
/// in sorted walk order. Unreadable entries below the root are logged and skipped.
pub fn find_descriptor_files(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root)
        .with_context(|| format!("input folder {}", root.display()))?;
    if !meta.is_dir() {
        bail!("input folder {} is not a directory", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_json(entry.path()) {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(count = files.len(), root = %root.display(), "descriptor files found");
    Ok(files)
}
