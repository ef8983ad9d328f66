//! Snapshot descriptor files: `{project_id, structure_id, snapshot_id}`.

use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const PROJECT_ID: &str = "project_id";
pub const STRUCTURE_ID: &str = "structure_id";
pub const SNAPSHOT_ID: &str = "snapshot_id";

/// Identifiers of one snapshot to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDescriptor {
    pub project_id: String,
    pub structure_id: String,
    pub snapshot_id: String,
}

impl fmt::Display for SnapshotDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.project_id, self.structure_id, self.snapshot_id
        )
    }
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value is not a JSON object")]
    NotAnObject,
    /// One or more required fields absent or empty; the file is skipped, not failed.
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("field {field} has unsupported type ({found})")]
    BadFieldType { field: &'static str, found: &'static str },
}

impl DescriptorError {
    /// Missing fields mean "skip"; everything else is a per-file failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, DescriptorError::MissingFields(_))
    }
}

pub fn read_descriptor(path: &Path) -> Result<SnapshotDescriptor, DescriptorError> {
    let data = fs::read(path)?;
    parse_descriptor(&data)
}

pub fn parse_descriptor(data: &[u8]) -> Result<SnapshotDescriptor, DescriptorError> {
    let value: Value = serde_json::from_slice(data)?;
    let obj = value.as_object().ok_or(DescriptorError::NotAnObject)?;

    let mut missing = Vec::new();
    let mut take = |field: &'static str| -> Result<Option<String>, DescriptorError> {
        let id = id_field(field, obj.get(field))?;
        if id.is_none() {
            missing.push(field);
        }
        Ok(id)
    };
    let project_id = take(PROJECT_ID)?;
    let structure_id = take(STRUCTURE_ID)?;
    let snapshot_id = take(SNAPSHOT_ID)?;

    match (project_id, structure_id, snapshot_id) {
        (Some(project_id), Some(structure_id), Some(snapshot_id)) => Ok(SnapshotDescriptor {
            project_id,
            structure_id,
            snapshot_id,
        }),
        _ => Err(DescriptorError::MissingFields(missing)),
    }
}

/// Falsy values (absent, null, "", false, 0) count as missing. Non-empty
/// strings pass through; other numbers are rendered as text.
fn id_field(field: &'static str, v: Option<&Value>) -> Result<Option<String>, DescriptorError> {
    match v {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(true)) => Err(DescriptorError::BadFieldType {
            field,
            found: "boolean",
        }),
        Some(Value::Array(_)) => Err(DescriptorError::BadFieldType {
            field,
            found: "array",
        }),
        Some(Value::Object(_)) => Err(DescriptorError::BadFieldType {
            field,
            found: "object",
        }),
    }
}
