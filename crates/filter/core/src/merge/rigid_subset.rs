use super::MergePass;
use super::slotwise::{assemble, merge_slotwise};
use crate::slot::{SetConfig, SlotConfig};
use crate::stats::SubStatSet;

/// Promotes rigid rules sharing all but one stat into a pick-one rule.
///
/// Two rigid rules of size `k` with `k - 1` stats in common become "the
/// common stats plus any one of the rest". A rigid rule that extends a
/// pick-one rule's mandatory set is absorbed into it the same way, so a
/// third rigid configuration can join a rule promoted earlier.
#[derive(Clone, Copy, Debug, Default)]
pub struct RigidSubsetPass;

impl MergePass for RigidSubsetPass {
    fn name(&self) -> &'static str {
        "rigid-subset"
    }

    fn try_merge(&self, target: &SetConfig, candidate: &SetConfig) -> Option<SetConfig> {
        let merge = merge_slotwise(target, candidate, promote_rigid)?;
        merge.changed.then(|| assemble(target, candidate, merge, true))
    }
}

/// Shape of a slot rule as seen by the promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    /// Exactly the `k` mandatory stats decide the match.
    Fixed(SubStatSet),
    /// `k - 1` mandatory stats plus one from the optional pool.
    PickOne(SubStatSet),
}

fn shape(slot: &SlotConfig) -> Option<Shape> {
    let k = usize::from(slot.min_stat_count);
    if k == 0 {
        return None;
    }
    match slot.must_present.len() {
        n if n == k => Some(Shape::Fixed(slot.must_present)),
        n if n + 1 == k => Some(Shape::PickOne(slot.must_present)),
        _ => None,
    }
}

pub(crate) fn promote_rigid(left: &SlotConfig, right: &SlotConfig) -> Option<SlotConfig> {
    if left.min_stat_count != right.min_stat_count {
        return None;
    }
    let k = left.min_stat_count;
    let pool = left.substats.union(right.substats);

    match (shape(left)?, shape(right)?) {
        (Shape::Fixed(a), Shape::Fixed(b)) => {
            let common = a.intersection(b);
            (common.len() + 1 >= usize::from(k)).then(|| {
                // Equal fixed sets keep their full mandatory set.
                let must = if common.len() == usize::from(k) {
                    common
                } else {
                    common.take_first(usize::from(k) - 1)
                };
                SlotConfig::new(pool, must, k)
            })
        }
        (Shape::PickOne(must), Shape::Fixed(fixed)) | (Shape::Fixed(fixed), Shape::PickOne(must)) => {
            must.is_subset_of(fixed).then(|| SlotConfig::new(pool, must, k))
        }
        (Shape::PickOne(_), Shape::PickOne(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::ServedCharacter;
    use crate::stats::SubStat;

    fn uniform(slot: SlotConfig, character: &str) -> SetConfig {
        SetConfig::from_slots(
            [slot.clone(), slot.clone(), slot.clone(), slot],
            vec![ServedCharacter::new(character, true, false)],
        )
    }

    #[test]
    fn rigid_pair_becomes_common_plus_one() {
        let a = SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::AtkPercent));
        let b = SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::EnergyRecharge));

        let merged = RigidSubsetPass.try_merge(&uniform(a, "a"), &uniform(b, "b")).unwrap();
        let slot = &merged.sands;
        assert_eq!(slot.must_present, SubStatSet::CRITS);
        assert_eq!(slot.min_stat_count, 3);
        assert_eq!(
            slot.substats,
            SubStatSet::CRITS
                .with(SubStat::AtkPercent)
                .with(SubStat::EnergyRecharge)
        );
        assert!(merged.served_characters.iter().all(|served| !served.has_perfect_merge));
    }

    #[test]
    fn too_little_overlap_is_rejected() {
        let a = SlotConfig::rigid(SubStatSet::of(&[SubStat::CritRate, SubStat::AtkPercent, SubStat::ElementalMastery]));
        let b = SlotConfig::rigid(SubStatSet::of(&[SubStat::CritRate, SubStat::EnergyRecharge, SubStat::HpPercent]));
        assert!(promote_rigid(&a, &b).is_none());
    }

    #[test]
    fn rigid_rule_is_absorbed_into_pick_one() {
        let pick = SlotConfig::new(
            SubStatSet::CRITS.with(SubStat::AtkPercent).with(SubStat::EnergyRecharge),
            SubStatSet::CRITS,
            3,
        );
        let rigid = SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::ElementalMastery));

        let merged = promote_rigid(&pick, &rigid).unwrap();
        assert_eq!(merged.must_present, SubStatSet::CRITS);
        assert_eq!(merged.substats.len(), 5);
        assert_eq!(promote_rigid(&rigid, &pick), Some(merged));
    }

    #[test]
    fn two_pick_one_rules_are_not_promoted() {
        let a = SlotConfig::new(SubStatSet::CRITS.with(SubStat::AtkPercent), SubStatSet::CRITS, 3);
        let b = SlotConfig::new(SubStatSet::CRITS.with(SubStat::EnergyRecharge), SubStatSet::CRITS, 3);
        assert!(promote_rigid(&a, &b).is_none());
    }

    #[test]
    fn counts_must_match() {
        let a = SlotConfig::rigid(SubStatSet::CRITS);
        let b = SlotConfig::rigid(SubStatSet::CRITS.with(SubStat::AtkPercent));
        assert!(promote_rigid(&a, &b).is_none());
    }
}
