use super::MergePass;
use super::slotwise::{assemble, merge_slotwise};
use crate::slot::{SetConfig, SlotConfig};

/// Unions the optional pools of pick-one rules.
///
/// Two slot rules qualify when they share the mandatory set and the count,
/// and need at most one stat beyond the mandatory ones. The merged rule keeps
/// both and accepts the union of the pools.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleFlexPass;

impl MergePass for SingleFlexPass {
    fn name(&self) -> &'static str {
        "single-flex"
    }

    fn try_merge(&self, target: &SetConfig, candidate: &SetConfig) -> Option<SetConfig> {
        let merge = merge_slotwise(target, candidate, merge_single_flex)?;
        merge.changed.then(|| assemble(target, candidate, merge, true))
    }
}

pub(crate) fn merge_single_flex(left: &SlotConfig, right: &SlotConfig) -> Option<SlotConfig> {
    if left.min_stat_count != right.min_stat_count || left.must_present != right.must_present {
        return None;
    }
    if left.flexible_count() > 1 {
        return None;
    }
    Some(SlotConfig::new(
        left.substats.union(right.substats),
        left.must_present,
        left.min_stat_count,
    ))
}
