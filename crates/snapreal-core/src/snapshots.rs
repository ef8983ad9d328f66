//! Snapshot listing and active-reality filtering.

use serde::Deserialize;

use crate::descriptor::SnapshotDescriptor;
use crate::endpoints::ApiEndpoints;
use crate::http::{ApiError, HttpClient, HttpRequest};

const OPERATION: &str = "get_all_snapshots";

/// Body of `GET .../structures/{id}/snapshots`.
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotListResponse {
    #[serde(default)]
    pub result: Option<SnapshotListResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotListResult {
    #[serde(default, rename = "mSnapshots")]
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub reality: Vec<Reality>,
}

#[derive(Debug, Deserialize)]
pub struct Reality {
    /// Only required on active realities of the requested snapshot.
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Reality {
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.to_lowercase() == "active")
    }
}

/// Ids of realities with status "active" (any case) under every snapshot whose
/// id equals `snapshot_id`, in response order. Entries outside that selection
/// are never inspected; a selected reality without `_id` is an error.
pub fn active_realities(
    list: &SnapshotListResponse,
    snapshot_id: &str,
) -> Result<Vec<String>, ApiError> {
    list.result
        .iter()
        .flat_map(|r| r.snapshots.iter())
        .filter(|snap| snap.id == snapshot_id)
        .flat_map(|snap| snap.reality.iter())
        .filter(|reality| reality.is_active())
        .map(|reality| {
            reality.id.clone().ok_or_else(|| ApiError::Rejected {
                operation: OPERATION.to_string(),
                message: format!("active reality in snapshot {} has no _id", snapshot_id),
            })
        })
        .collect()
}

/// Source of active reality ids for a descriptor. The batch driver only sees this.
pub trait RealitySource {
    fn active_realities(&self, descriptor: &SnapshotDescriptor) -> Result<Vec<String>, ApiError>;
}

/// Authenticated snapshot API client.
pub struct SnapshotClient<'a> {
    http: &'a HttpClient,
    endpoints: &'a ApiEndpoints,
    token: String,
}

impl<'a> SnapshotClient<'a> {
    pub fn new(http: &'a HttpClient, endpoints: &'a ApiEndpoints, token: String) -> Self {
        Self {
            http,
            endpoints,
            token,
        }
    }

    pub fn list_snapshots(
        &self,
        project_id: &str,
        structure_id: &str,
    ) -> Result<SnapshotListResponse, ApiError> {
        let url = self.endpoints.snapshots_url(project_id, structure_id);
        let req = HttpRequest::get(url)
            .bearer(&self.token)
            .header("Connection", "close");
        let resp = self.http.send(OPERATION, &req)?;
        if resp.status != 200 {
            return Err(ApiError::Status {
                operation: OPERATION.to_string(),
                status: resp.status,
                body: resp.body_snippet(),
            });
        }
        resp.json(OPERATION)
    }
}

impl RealitySource for SnapshotClient<'_> {
    fn active_realities(&self, descriptor: &SnapshotDescriptor) -> Result<Vec<String>, ApiError> {
        let list = self.list_snapshots(&descriptor.project_id, &descriptor.structure_id)?;
        let ids = active_realities(&list, &descriptor.snapshot_id)?;
        tracing::debug!(%descriptor, active = ids.len(), "filtered realities");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> SnapshotListResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn only_matching_snapshot_and_active_status() {
        let list = parse(
            r#"{"result":{"mSnapshots":[
                {"_id":"OTHER","reality":[{"_id":"X1","status":"active"}]},
                {"_id":"SN1","reality":[
                    {"_id":"R1","status":"Active"},
                    {"_id":"R2","status":"inactive"},
                    {"_id":"R3","status":"ACTIVE"},
                    {"_id":"R4"}
                ]}
            ]}}"#,
        );
        assert_eq!(active_realities(&list, "SN1").unwrap(), vec!["R1", "R3"]);
        assert_eq!(active_realities(&list, "OTHER").unwrap(), vec!["X1"]);
        assert!(active_realities(&list, "NONE").unwrap().is_empty());
    }

    #[test]
    fn missing_sections_are_empty() {
        assert!(active_realities(&parse("{}"), "SN1").unwrap().is_empty());
        assert!(active_realities(&parse(r#"{"result":{}}"#), "SN1")
            .unwrap()
            .is_empty());
        assert!(active_realities(&parse(r#"{"result":{"mSnapshots":[{"_id":"SN1"}]}}"#), "SN1")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn status_must_equal_active_exactly() {
        let list = parse(
            r#"{"result":{"mSnapshots":[{"_id":"S","reality":[
                {"_id":"A","status":" active"},
                {"_id":"B","status":"inactive"},
                {"_id":"C","status":"active"}
            ]}]}}"#,
        );
        assert_eq!(active_realities(&list, "S").unwrap(), vec!["C"]);
    }

    #[test]
    fn id_less_realities_outside_selection_are_ignored() {
        let list = parse(
            r#"{"result":{"mSnapshots":[
                {"_id":"OTHER","reality":[{"status":"active"}]},
                {"_id":"SN1","reality":[
                    {"_id":"R1","status":"Active"},
                    {"status":"inactive"}
                ]}
            ]}}"#,
        );
        assert_eq!(active_realities(&list, "SN1").unwrap(), vec!["R1"]);
    }

    #[test]
    fn active_selected_reality_without_id_is_error() {
        let list = parse(
            r#"{"result":{"mSnapshots":[{"_id":"SN1","reality":[
                {"_id":"R1","status":"active"},
                {"status":"ACTIVE"}
            ]}]}}"#,
        );
        let err = active_realities(&list, "SN1").unwrap_err();
        assert!(matches!(err, ApiError::Rejected { .. }));
        assert!(err.to_string().contains("SN1"), "{err}");
    }

    #[test]
    fn snapshot_without_id_is_decode_error() {
        let r: Result<SnapshotListResponse, _> =
            serde_json::from_str(r#"{"result":{"mSnapshots":[{"reality":[]}]}}"#);
        assert!(r.is_err());
    }
}
