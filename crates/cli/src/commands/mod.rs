//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod chance;
mod compute;
mod presets;

pub use chance::Chance;
pub use compute::Compute;
pub use presets::Presets;
