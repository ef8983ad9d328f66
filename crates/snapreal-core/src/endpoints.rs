//! API URL construction from a base URL and version path.

use anyhow::{bail, Context, Result};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Base + version path (e.g. `https://api.track3d.ai/api/v1`).
    root: Url,
}

impl ApiEndpoints {
    /// `base_url` must be an absolute http(s) URL; `api_version` is a path such as `/api/v1`
    /// (leading/trailing slashes are normalized, empty is allowed).
    pub fn new(base_url: &str, api_version: &str) -> Result<Self> {
        let mut root =
            Url::parse(base_url).with_context(|| format!("invalid base URL: {}", base_url))?;
        if root.scheme() != "http" && root.scheme() != "https" {
            bail!("base URL must be http or https: {}", base_url);
        }
        root.set_query(None);
        root.set_fragment(None);
        let version: Vec<&str> = api_version.split('/').filter(|s| !s.is_empty()).collect();
        let mut endpoints = Self { root };
        endpoints.root = endpoints.join(&version);
        Ok(endpoints)
    }

    /// Root URL with `segments` appended, each percent-encoded as one path segment.
    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.root.clone();
        // http(s) URLs always have a hierarchical path, so this only fails for
        // schemes rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn signin_url(&self) -> String {
        self.join(&["users", "signin"]).into()
    }

    pub fn snapshots_url(&self, project_id: &str, structure_id: &str) -> String {
        self.join(&["projects", project_id, "structures", structure_id, "snapshots"])
            .into()
    }
}
