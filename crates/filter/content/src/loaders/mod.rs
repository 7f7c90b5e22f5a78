//! Content loaders for reading build data from files.
//!
//! Payloads are JSON, option files are TOML. Errors name the file and the
//! underlying parse failure.

pub mod options;
pub mod payload;
pub mod preset;

pub use options::OptionsLoader;
pub use payload::{BuildPayload, PayloadLoader};
pub use preset::{PresetLoader, PresetOption};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
