//! Filter computer and the end-to-end rule pipeline.
//!
//! [`compute_artifact_filters`] turns build requests into raw per-key
//! configurations. [`compute_filter_rules`] runs the whole flow:
//!
//! 1. Drop hidden groups and invisible builds
//! 2. Derive one raw configuration per build, keyed by its set or set pair
//! 3. Merge the configurations of each key
//! 4. Expand `cr/cd`, order main stats
//! 5. Order configurations by priority

mod broaden;
mod finalize;
mod requirement;

pub use broaden::{Broadened, expand_crit_circlet, expand_elemental_goblet};
pub use finalize::{finalize_config, finalize_main_stats, sort_configurations};
pub use requirement::{derive_requirement, detect_must_present};

use crate::build::{Build, BuildGroup, FilterGroup, FilterKey};
use crate::config::ComputeOptions;
use crate::merge::simple_merge;
use crate::slot::{ServedCharacter, SetConfig};
use crate::stats::SubStatSet;

// ============================================================================
// Filter Computer
// ============================================================================

/// Converts build requests into raw configurations grouped by filter key.
///
/// Groups appear in order of the first build targeting them. Configurations
/// are not merged here.
pub fn compute_artifact_filters(groups: &[BuildGroup], options: &ComputeOptions) -> Vec<FilterGroup> {
    let mut filters: Vec<FilterGroup> = Vec::new();
    let mut skipped = 0usize;

    let visible = groups
        .iter()
        .filter(|group| !group.hidden)
        .flat_map(|group| {
            group
                .builds
                .iter()
                .filter(|build| build.visible)
                .map(move |build| (group.character_id.as_str(), build))
        });

    for (character_id, build) in visible {
        let Some(key) = build.composition.filter_key() else {
            tracing::warn!(
                character = character_id,
                build = build.id.as_str(),
                "build has no artifact set, ignoring"
            );
            continue;
        };

        let config = config_from_build(character_id, build, options);

        if options.skip_crit_builds && config.flower_plume.must_present == SubStatSet::CRITS {
            skipped += 1;
            continue;
        }

        group_for(&mut filters, key).configurations.push(config);
    }

    tracing::debug!(
        keys = filters.len(),
        configurations = filters.iter().map(|group| group.configurations.len()).sum::<usize>(),
        skipped_crit_builds = skipped,
        "computed raw filter configurations"
    );
    filters
}

/// Full pipeline: compute, merge per key, finalize, order.
pub fn compute_filter_rules(groups: &[BuildGroup], options: &ComputeOptions) -> Vec<FilterGroup> {
    let merge_options = options.merge_options();

    compute_artifact_filters(groups, options)
        .into_iter()
        .map(|group| {
            let mut configurations: Vec<SetConfig> = simple_merge(&group.configurations, merge_options)
                .into_iter()
                .map(finalize_config)
                .collect();
            sort_configurations(&mut configurations);

            tracing::debug!(
                key = %group.key,
                raw = group.configurations.len(),
                merged = configurations.len(),
                "merged filter group"
            );
            FilterGroup {
                key: group.key,
                configurations,
            }
        })
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

fn group_for(filters: &mut Vec<FilterGroup>, key: FilterKey) -> &mut FilterGroup {
    let index = match filters.iter().position(|group| group.key == key) {
        Some(index) => index,
        None => {
            filters.push(FilterGroup::new(key));
            filters.len() - 1
        }
    };
    &mut filters[index]
}

fn config_from_build(character_id: &str, build: &Build, options: &ComputeOptions) -> SetConfig {
    let four_piece = build.composition.is_four_piece();
    let requirement = derive_requirement(build);
    let mut perfect = true;

    let goblet = if options.expand_elemental_goblet {
        let broadened = expand_elemental_goblet(&build.goblet);
        perfect &= !broadened.altered;
        broadened.choices
    } else {
        build.goblet.clone()
    };

    let circlet = if options.expand_crit_circlet && four_piece {
        let broadened = expand_crit_circlet(&build.circlet);
        perfect &= !broadened.altered;
        broadened.choices
    } else {
        build.circlet.clone()
    };

    SetConfig::from_slots(
        [
            requirement.clone(),
            requirement.clone().with_main_stats(build.sands.iter().copied()),
            requirement.clone().with_main_stats(goblet),
            requirement.with_main_stats(circlet),
        ],
        vec![ServedCharacter::new(character_id, perfect, four_piece)],
    )
}
