//! Preset directory listing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::loaders::{BuildPayload, LoadResult, PayloadLoader, read_file};

/// A payload file offered as a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetOption {
    pub path: PathBuf,
    /// `[author] description`, or a label derived from the file name.
    pub label: String,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Only the metadata of a payload; builds are not parsed.
#[derive(Deserialize)]
struct PresetHeader {
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
}

/// Lists and opens build payloads stored in a directory.
pub struct PresetLoader;

impl PresetLoader {
    /// Lists every `.json` file of `dir`, sorted by label.
    ///
    /// Files whose metadata cannot be read are still listed under their file
    /// name.
    pub fn list(dir: &Path) -> LoadResult<Vec<PresetOption>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read preset directory {}: {}", dir.display(), e))?;

        let mut options = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("Failed to read preset directory {}: {}", dir.display(), e))?
                .path();
            let is_json = path
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                options.push(Self::describe(path));
            }
        }

        options.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(options)
    }

    /// Loads the payload behind a listed preset.
    pub fn load(option: &PresetOption) -> LoadResult<BuildPayload> {
        PayloadLoader::load(&option.path)
    }

    fn describe(path: PathBuf) -> PresetOption {
        let header = read_file(&path).and_then(|content| {
            serde_json::from_str::<PresetHeader>(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse preset metadata: {}", e))
        });

        match header {
            Ok(header) if !header.author.is_empty() && !header.description.is_empty() => PresetOption {
                label: format!("[{}] {}", header.author, header.description),
                author: Some(header.author),
                description: Some(header.description),
                path,
            },
            Ok(_) => PresetOption {
                label: label_from_file_name(&path),
                author: None,
                description: None,
                path,
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable preset metadata");
                PresetOption {
                    label: label_from_file_name(&path),
                    author: None,
                    description: None,
                    path,
                }
            }
        }
    }
}

/// `my_team-builds.json` becomes `my team builds`.
fn label_from_file_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let label = stem
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if label.trim().is_empty() { file_name } else { label.trim().to_owned() }
}
