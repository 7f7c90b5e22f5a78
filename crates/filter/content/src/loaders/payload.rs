//! Build payload loader.

use std::path::Path;

use filter_core::{BuildGroup, ComputeOptions, ComputeOptionsOverrides};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Build payload structure for JSON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPayload {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub data: Vec<BuildGroup>,
    /// Options stored alongside the builds; unset keys keep their defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_options: Option<ComputeOptionsOverrides>,
}

impl BuildPayload {
    /// Compute options of the payload layered over the defaults.
    pub fn options(&self) -> ComputeOptions {
        self.compute_options
            .unwrap_or_default()
            .apply(ComputeOptions::default())
    }

    /// Number of builds across all groups.
    pub fn build_count(&self) -> usize {
        self.data.iter().map(|group| group.builds.len()).sum()
    }
}

/// Loader for build payloads from JSON files.
pub struct PayloadLoader;

impl PayloadLoader {
    /// Load a build payload from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file containing a BuildPayload
    pub fn load(path: &Path) -> LoadResult<BuildPayload> {
        let content = read_file(path)?;
        let payload = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load payload {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            groups = payload.data.len(),
            builds = payload.build_count(),
            "loaded build payload"
        );
        Ok(payload)
    }

    /// Parse a build payload from JSON text.
    pub fn from_json(content: &str) -> LoadResult<BuildPayload> {
        let payload: BuildPayload = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse build payload JSON: {}", e))?;
        Ok(payload)
    }
}
