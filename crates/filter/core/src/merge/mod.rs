//! Configuration merger.
//!
//! Collapses the configurations of one filter key into fewer, more general
//! ones. Each reduction is a [`MergePass`]; [`MergePipeline`] runs the enabled
//! passes in a fixed order:
//!
//! 1. identical merge (always on)
//! 2. single-flex merge (`merge_single_flex_variants`)
//! 3. rigid common-subset promotion (`find_rigid_common_subset`)
//! 4. single-flex merge again, since promotion produces pick-one rules
//!
//! Every pass merges pairs until none qualifies, and the whole sequence is
//! repeated until a round merges nothing. Every merge is checked on all four
//! slots at once, so a pair either merges on every slot or not at all.

mod identical;
mod rigid_subset;
mod single_flex;
pub(crate) mod slotwise;

pub use identical::IdenticalPass;
pub use rigid_subset::RigidSubsetPass;
pub use single_flex::SingleFlexPass;

use crate::config::MergeOptions;
use crate::slot::SetConfig;

/// A pairwise reduction over configurations of the same key.
pub trait MergePass: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the merged configuration if `target` and `candidate` qualify.
    ///
    /// The result takes `target`'s place; `candidate` is dropped.
    fn try_merge(&self, target: &SetConfig, candidate: &SetConfig) -> Option<SetConfig>;
}

/// Ordered sequence of merge passes.
pub struct MergePipeline {
    passes: Vec<Box<dyn MergePass>>,
}

impl MergePipeline {
    /// Assembles the passes enabled by `options`.
    pub fn from_options(options: MergeOptions) -> Self {
        let mut passes: Vec<Box<dyn MergePass>> = vec![Box::new(IdenticalPass)];
        if options.merge_single_flex_variants {
            passes.push(Box::new(SingleFlexPass));
        }
        if options.find_rigid_common_subset {
            passes.push(Box::new(RigidSubsetPass));
            if options.merge_single_flex_variants {
                passes.push(Box::new(SingleFlexPass));
            }
        }
        Self { passes }
    }

    /// Names of the passes in execution order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Runs every pass in order, repeating rounds until one merges nothing.
    pub fn run(&self, configs: &[SetConfig]) -> Vec<SetConfig> {
        let mut current = configs.to_vec();
        if current.len() <= 1 {
            return current;
        }

        let mut round = 0usize;
        loop {
            round += 1;
            let merged: usize = self
                .passes
                .iter()
                .map(|pass| merge_until_stable(pass.as_ref(), &mut current))
                .sum();
            if merged == 0 {
                break;
            }
        }

        tracing::debug!(
            before = configs.len(),
            after = current.len(),
            rounds = round,
            "merge pipeline finished"
        );
        current
    }
}

impl Default for MergePipeline {
    fn default() -> Self {
        Self::from_options(MergeOptions::default())
    }
}

/// Merges configurations of one key.
///
/// Inputs are not modified. Empty and single-element inputs come back
/// unchanged.
pub fn simple_merge(configs: &[SetConfig], options: MergeOptions) -> Vec<SetConfig> {
    MergePipeline::from_options(options).run(configs)
}

/// Applies `pass` to the first qualifying pair until no pair qualifies.
///
/// Returns the number of merges performed.
fn merge_until_stable(pass: &dyn MergePass, configs: &mut Vec<SetConfig>) -> usize {
    let mut merges = 0;
    while let Some((i, j, merged)) = first_mergeable_pair(pass, configs) {
        tracing::trace!(pass = pass.name(), target = i, candidate = j, "merged configurations");
        configs[i] = merged;
        configs.remove(j);
        merges += 1;
    }
    merges
}

fn first_mergeable_pair(pass: &dyn MergePass, configs: &[SetConfig]) -> Option<(usize, usize, SetConfig)> {
    for i in 0..configs.len() {
        for j in (i + 1)..configs.len() {
            if let Some(merged) = pass.try_merge(&configs[i], &configs[j]) {
                return Some((i, j, merged));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{ServedCharacter, SlotConfig};
    use crate::stats::{SubStat, SubStatSet};

    fn uniform(slot: SlotConfig, character: &str) -> SetConfig {
        SetConfig::from_slots(
            [slot.clone(), slot.clone(), slot.clone(), slot],
            vec![ServedCharacter::new(character, true, true)],
        )
    }

    #[test]
    fn pipeline_order_follows_options() {
        assert_eq!(MergePipeline::default().pass_names(), vec!["identical"]);
        assert_eq!(
            MergePipeline::from_options(MergeOptions::all()).pass_names(),
            vec!["identical", "single-flex", "rigid-subset", "single-flex"]
        );
        assert_eq!(
            MergePipeline::from_options(MergeOptions {
                merge_single_flex_variants: false,
                find_rigid_common_subset: true,
            })
            .pass_names(),
            vec!["identical", "rigid-subset"]
        );
    }

    #[test]
    fn trivial_inputs_pass_through() {
        assert!(simple_merge(&[], MergeOptions::all()).is_empty());
        let single = uniform(SlotConfig::rigid(SubStatSet::CRITS), "a");
        assert_eq!(simple_merge(std::slice::from_ref(&single), MergeOptions::all()), vec![single]);
    }

    #[test]
    fn promotion_then_absorption_yields_one_rule() {
        let stats = |extra: SubStat| SlotConfig::rigid(SubStatSet::CRITS.with(extra));
        let configs = vec![
            uniform(stats(SubStat::AtkPercent), "a"),
            uniform(stats(SubStat::EnergyRecharge), "b"),
            uniform(stats(SubStat::ElementalMastery), "c"),
        ];

        let merged = simple_merge(&configs, MergeOptions::all());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].goblet.must_present, SubStatSet::CRITS);
        assert_eq!(merged[0].goblet.substats.len(), 5);
        assert_eq!(merged[0].served_characters.len(), 3);
    }

    #[test]
    fn optional_passes_are_off_by_default() {
        let configs = vec![
            uniform(SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::AtkPercent)), "a"),
            uniform(SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::EnergyRecharge)), "b"),
        ];
        assert_eq!(simple_merge(&configs, MergeOptions::default()).len(), 2);
    }
}
