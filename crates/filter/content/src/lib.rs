//! Build payload and option file loaders.
//!
//! This crate reads the files the artifact filter front ends work from:
//! - Build payloads (JSON): character build groups plus optional compute options
//! - Compute options (TOML): partial overrides of the engine switches
//! - Preset directories: labelled listings of bundled build payloads
//!
//! All loaders deserialize filter-core types directly through its `serde` feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BuildPayload, OptionsLoader, PayloadLoader, PresetLoader, PresetOption};
