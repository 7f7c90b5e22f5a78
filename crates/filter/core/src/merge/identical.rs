use super::MergePass;
use super::slotwise::{assemble, merge_slotwise};
use crate::slot::SetConfig;

/// Collapses configurations whose four slots carry the same secondary-stat
/// requirement. Only main stats and served characters are combined.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdenticalPass;

impl MergePass for IdenticalPass {
    fn name(&self) -> &'static str {
        "identical"
    }

    fn try_merge(&self, target: &SetConfig, candidate: &SetConfig) -> Option<SetConfig> {
        let merge = merge_slotwise(target, candidate, |_, _| None)?;
        Some(assemble(target, candidate, merge, false))
    }
}
