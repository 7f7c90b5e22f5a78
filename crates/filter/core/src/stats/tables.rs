//! Static drop and roll weight tables.
//!
//! Weights are relative; only ratios within one table matter. Secondary stat
//! weights follow the in-game roll odds (flat 6, percent/EM/ER 4, crits 3).
//! Main stat tables are per slot, in percent.

use super::{MainStat, SubStat};
use crate::slot::SlotKind;

/// Number of secondary stats an artifact ends up with.
pub const SUBSTAT_DRAW_COUNT: usize = 4;

/// Relative roll weight of a secondary stat.
pub const fn substat_weight(stat: SubStat) -> f64 {
    match stat {
        SubStat::FlatHp | SubStat::FlatAtk | SubStat::FlatDef => 6.0,
        SubStat::HpPercent
        | SubStat::AtkPercent
        | SubStat::DefPercent
        | SubStat::EnergyRecharge
        | SubStat::ElementalMastery => 4.0,
        SubStat::CritRate | SubStat::CritDamage => 3.0,
    }
}

/// Flower (flat HP) and plume (flat ATK) are equally likely.
const FLOWER_PLUME_POOL: [(MainStat, f64); 2] = [(MainStat::FlatHp, 1.0), (MainStat::FlatAtk, 1.0)];

const SANDS_POOL: [(MainStat, f64); 5] = [
    (MainStat::AtkPercent, 26.66),
    (MainStat::HpPercent, 26.66),
    (MainStat::DefPercent, 26.66),
    (MainStat::ElementalMastery, 10.0),
    (MainStat::EnergyRecharge, 10.0),
];

const GOBLET_POOL: [(MainStat, f64); 12] = [
    (MainStat::AtkPercent, 21.25),
    (MainStat::HpPercent, 21.25),
    (MainStat::DefPercent, 20.0),
    (MainStat::ElementalMastery, 2.5),
    (MainStat::PyroDmg, 5.0),
    (MainStat::HydroDmg, 5.0),
    (MainStat::AnemoDmg, 5.0),
    (MainStat::ElectroDmg, 5.0),
    (MainStat::DendroDmg, 5.0),
    (MainStat::CryoDmg, 5.0),
    (MainStat::GeoDmg, 5.0),
    (MainStat::PhysicalDmg, 5.0),
];

const CIRCLET_POOL: [(MainStat, f64); 7] = [
    (MainStat::CritRate, 10.0),
    (MainStat::CritDamage, 10.0),
    (MainStat::AtkPercent, 22.0),
    (MainStat::HpPercent, 22.0),
    (MainStat::DefPercent, 22.0),
    (MainStat::ElementalMastery, 4.0),
    (MainStat::HealingBonus, 10.0),
];

/// Main stats a slot can drop with, paired with their drop weights.
pub const fn main_stat_pool(slot: SlotKind) -> &'static [(MainStat, f64)] {
    match slot {
        SlotKind::FlowerPlume => &FLOWER_PLUME_POOL,
        SlotKind::Sands => &SANDS_POOL,
        SlotKind::Goblet => &GOBLET_POOL,
        SlotKind::Circlet => &CIRCLET_POOL,
    }
}

/// Drop weight of `stat` in `slot`, or 0 when the slot never drops it.
pub fn main_stat_weight(slot: SlotKind, stat: MainStat) -> f64 {
    main_stat_pool(slot)
        .iter()
        .find(|(candidate, _)| *candidate == stat)
        .map_or(0.0, |(_, weight)| *weight)
}

/// Sum of all drop weights of `slot`.
pub fn main_stat_total(slot: SlotKind) -> f64 {
    main_stat_pool(slot).iter().map(|(_, weight)| weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_has_positive_mass() {
        for slot in SlotKind::all() {
            assert!(main_stat_total(slot) > 0.0, "{slot} has no main stats");
        }
    }

    #[test]
    fn unknown_main_stat_has_no_weight() {
        assert_eq!(main_stat_weight(SlotKind::Goblet, MainStat::EnergyRecharge), 0.0);
        assert_eq!(main_stat_weight(SlotKind::Sands, MainStat::CritRate), 0.0);
        assert_eq!(main_stat_weight(SlotKind::Circlet, MainStat::HealingBonus), 10.0);
    }

    #[test]
    fn crits_are_the_rarest_substats() {
        let crit = substat_weight(SubStat::CritRate);
        for stat in SubStat::all() {
            assert!(substat_weight(stat) >= crit);
        }
    }
}
