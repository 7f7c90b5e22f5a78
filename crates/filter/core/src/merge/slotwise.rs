//! Cross-slot merge predicate and served-character bookkeeping.
//!
//! A pair of configurations merges only if all four slots qualify at once;
//! [`merge_slotwise`] evaluates the slots together and either returns the
//! complete merged tuple or nothing.

use crate::slot::{ServedCharacter, SetConfig, SlotConfig, SlotKind};
use crate::stats::union_choices;

/// Result of a successful four-slot merge.
#[derive(Clone, Debug)]
pub(crate) struct SlotwiseMerge {
    pub slots: [SlotConfig; SlotKind::COUNT],
    /// At least one slot was merged by the rule rather than being equal.
    pub changed: bool,
}

/// Merges two configurations slot by slot.
///
/// Slots with the same requirement always qualify. Any other slot pair is
/// handed to `rule`, which returns the merged secondary-stat requirement or
/// `None` to veto the whole pair. Main stats are unioned on every slot.
pub(crate) fn merge_slotwise<F>(target: &SetConfig, candidate: &SetConfig, mut rule: F) -> Option<SlotwiseMerge>
where
    F: FnMut(&SlotConfig, &SlotConfig) -> Option<SlotConfig>,
{
    let mut changed = false;
    let mut slots: [SlotConfig; SlotKind::COUNT] = Default::default();

    for kind in SlotKind::all() {
        let (left, right) = (target.slot(kind), candidate.slot(kind));

        let mut merged = if left.same_requirement(right) {
            left.clone()
        } else {
            changed = true;
            rule(left, right)?
        };
        merged.main_stats = union_choices(&left.main_stats, &right.main_stats);
        slots[kind.as_index()] = merged;
    }

    Some(SlotwiseMerge { slots, changed })
}

/// True if some merged slot lets through items `original` would reject on
/// secondary stats.
pub(crate) fn broadens(merged: &[SlotConfig; SlotKind::COUNT], original: &SetConfig) -> bool {
    SlotKind::all()
        .into_iter()
        .any(|kind| !merged[kind.as_index()].equivalent_requirement(original.slot(kind)))
}

/// Combines served characters of two merged configurations.
///
/// A character on both sides keeps `has_perfect_merge` only if both sides had
/// it and `has_4pc_build` if either side had it. Characters of `candidate`
/// not yet served are appended in order.
pub(crate) fn merge_served(target: &[ServedCharacter], candidate: &[ServedCharacter]) -> Vec<ServedCharacter> {
    let mut merged = target.to_vec();
    for incoming in candidate {
        match merged
            .iter_mut()
            .find(|served| served.character_id == incoming.character_id)
        {
            Some(existing) => {
                existing.has_perfect_merge &= incoming.has_perfect_merge;
                existing.has_4pc_build |= incoming.has_4pc_build;
            }
            None => merged.push(incoming.clone()),
        }
    }
    merged
}

/// Builds the merged configuration.
///
/// With `track_broadening`, characters of a side whose requirement was
/// loosened lose their perfect-merge flag.
pub(crate) fn assemble(
    target: &SetConfig,
    candidate: &SetConfig,
    merge: SlotwiseMerge,
    track_broadening: bool,
) -> SetConfig {
    let target_served = served_after(target, &merge.slots, track_broadening);
    let candidate_served = served_after(candidate, &merge.slots, track_broadening);
    SetConfig::from_slots(merge.slots, merge_served(&target_served, &candidate_served))
}

fn served_after(
    side: &SetConfig,
    merged: &[SlotConfig; SlotKind::COUNT],
    track_broadening: bool,
) -> Vec<ServedCharacter> {
    if !track_broadening || !broadens(merged, side) {
        return side.served_characters.clone();
    }
    side.served_characters
        .iter()
        .map(|served| ServedCharacter {
            has_perfect_merge: false,
            ..served.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{MainStat, SubStat, SubStatSet};

    fn uniform(slot: SlotConfig, character: &str) -> SetConfig {
        SetConfig::from_slots(
            [slot.clone(), slot.clone(), slot.clone(), slot],
            vec![ServedCharacter::new(character, true, true)],
        )
    }

    #[test]
    fn equal_slots_qualify_without_the_rule() {
        let slot = SlotConfig::rigid(SubStatSet::CRITS);
        let mut a = uniform(slot.clone(), "a");
        a.sands.main_stats = vec![MainStat::AtkPercent.into()];
        let mut b = uniform(slot, "b");
        b.sands.main_stats = vec![MainStat::EnergyRecharge.into()];

        let merge = merge_slotwise(&a, &b, |_, _| None).unwrap();
        assert!(!merge.changed);
        assert_eq!(merge.slots[SlotKind::Sands.as_index()].main_stats.len(), 2);
    }

    #[test]
    fn one_failing_slot_vetoes_the_pair() {
        let a = uniform(SlotConfig::rigid(SubStatSet::CRITS), "a");
        let mut b = a.clone();
        b.circlet = SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::AtkPercent));
        assert!(merge_slotwise(&a, &b, |_, _| None).is_none());
    }

    #[test]
    fn served_characters_and_or() {
        let target = vec![ServedCharacter::new("a", true, false)];
        let candidate = vec![
            ServedCharacter::new("a", false, true),
            ServedCharacter::new("b", true, false),
        ];
        let merged = merge_served(&target, &candidate);
        assert_eq!(
            merged,
            vec![
                ServedCharacter::new("a", false, true),
                ServedCharacter::new("b", true, false),
            ]
        );
    }

    #[test]
    fn only_broadened_side_loses_perfect_merge() {
        let narrow = uniform(
            SlotConfig::new(SubStatSet::CRITS.with(SubStat::AtkPercent), SubStatSet::CRITS, 3),
            "narrow",
        );
        let wide_slot = SlotConfig::new(
            SubStatSet::CRITS.with(SubStat::AtkPercent).with(SubStat::EnergyRecharge),
            SubStatSet::CRITS,
            3,
        );
        let wide = uniform(wide_slot.clone(), "wide");

        let merge = merge_slotwise(&narrow, &wide, |_, _| Some(wide_slot.clone())).unwrap();
        let merged = assemble(&narrow, &wide, merge, true);

        assert!(!merged.served("narrow").unwrap().has_perfect_merge);
        assert!(merged.served("wide").unwrap().has_perfect_merge);
    }
}
