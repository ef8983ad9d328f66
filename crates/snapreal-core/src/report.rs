//! CSV output of active realities.

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::descriptor::SnapshotDescriptor;

pub const CSV_HEADER: [&str; 4] = ["project_id", "structure_id", "snapshot_id", "reality_id"];

/// One active reality of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub project_id: String,
    pub structure_id: String,
    pub snapshot_id: String,
    pub reality_id: String,
}

impl ResultRow {
    pub fn new(descriptor: &SnapshotDescriptor, reality_id: String) -> Self {
        Self {
            project_id: descriptor.project_id.clone(),
            structure_id: descriptor.structure_id.clone(),
            snapshot_id: descriptor.snapshot_id.clone(),
            reality_id,
        }
    }

    fn fields(&self) -> [&str; 4] {
        [
            self.project_id.as_str(),
            self.structure_id.as_str(),
            self.snapshot_id.as_str(),
            self.reality_id.as_str(),
        ]
    }
}

/// Quote a field if it contains a separator, quote, or line break.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_record<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

/// Serialize header + rows (CRLF line endings).
pub fn write_rows<W: Write>(out: &mut W, rows: &[ResultRow]) -> std::io::Result<()> {
    write_record(out, &CSV_HEADER)?;
    for row in rows {
        write_record(out, &row.fields())?;
    }
    Ok(())
}

/// Write all rows to `path`, creating parent directories. Overwrites an existing file.
pub fn write_csv(path: &Path, rows: &[ResultRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output folder {}", parent.display()))?;
    }
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, rows).with_context(|| format!("write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    tracing::info!(rows = rows.len(), "CSV saved to {}", path.display());
    Ok(())
}
