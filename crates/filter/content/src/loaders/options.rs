//! Compute options loader.

use std::path::Path;

use filter_core::{ComputeOptions, ComputeOptionsOverrides};

use crate::loaders::{LoadResult, read_file};

/// Loader for compute options from TOML files.
///
/// Keys use the payload's camelCase names (`skipCritBuilds`,
/// `expandElementalGoblet`, ...). Missing keys are left unset.
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load compute options from a TOML file, filling missing keys with
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<ComputeOptions> {
        Ok(Self::load_overrides(path)?.apply(ComputeOptions::default()))
    }

    /// Load only the keys present in a TOML file.
    pub fn load_overrides(path: &Path) -> LoadResult<ComputeOptionsOverrides> {
        let content = read_file(path)?;
        let overrides = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load options {}: {}", path.display(), e))?;

        tracing::info!(path = %path.display(), "loaded compute options");
        Ok(overrides)
    }

    /// Parse compute option overrides from TOML text.
    pub fn from_toml(content: &str) -> LoadResult<ComputeOptionsOverrides> {
        let overrides: ComputeOptionsOverrides = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse options TOML: {}", e))?;
        Ok(overrides)
    }
}
