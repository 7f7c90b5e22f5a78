//! Chance estimator.
//!
//! Estimates how likely a freshly dropped artifact of a slot passes a slot
//! rule. An item first draws its main stat from the slot's weight table, then
//! rolls four secondary stats without replacement from every secondary type
//! other than its main stat. The in-game filter counts the main stat towards
//! the rule, so a `cr` circlet already covers a mandatory `cr`.

mod draw;

pub use draw::DrawTable;

use crate::slot::{SetConfig, SlotConfig, SlotKind};
use crate::stats::tables::{SUBSTAT_DRAW_COUNT, main_stat_pool, main_stat_total};
use crate::stats::{MainStat, MainStatChoice, SubStatSet};

/// One value per logical slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PerSlot<T> {
    pub flower_plume: T,
    pub sands: T,
    pub goblet: T,
    pub circlet: T,
}

impl<T> PerSlot<T> {
    pub fn from_fn(mut f: impl FnMut(SlotKind) -> T) -> Self {
        Self {
            flower_plume: f(SlotKind::FlowerPlume),
            sands: f(SlotKind::Sands),
            goblet: f(SlotKind::Goblet),
            circlet: f(SlotKind::Circlet),
        }
    }

    pub fn get(&self, kind: SlotKind) -> &T {
        match kind {
            SlotKind::FlowerPlume => &self.flower_plume,
            SlotKind::Sands => &self.sands,
            SlotKind::Goblet => &self.goblet,
            SlotKind::Circlet => &self.circlet,
        }
    }
}

/// Pass probability of every slot of a configuration.
pub type SlotChances = PerSlot<f64>;

/// Chance details of every slot of a configuration.
pub type SlotChanceDetails = PerSlot<SlotChanceDetail>;

/// Chance of a slot rule together with the chance of its next stricter count.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SlotChanceDetail {
    pub base: f64,
    /// Present when the count can still be raised by one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tightened: Option<TightenedChance>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TightenedChance {
    pub min_stat_count: u8,
    pub chance: f64,
}

/// Probability that a random item of `slot` passes `config`, in `[0, 1]`.
pub fn compute_slot_chance(slot: SlotKind, config: &SlotConfig) -> f64 {
    let mains = main_stat_outcomes(slot, &config.main_stats);

    if config.min_stat_count == 0 && config.must_present.is_empty() {
        return main_factor(slot, config, &mains).clamp(0.0, 1.0);
    }

    let chance: f64 = mains
        .iter()
        .map(|(main, probability)| probability * secondary_chance(*main, config))
        .sum();
    chance.clamp(0.0, 1.0)
}

/// Probability that an item already known to carry `main` passes `config`.
///
/// Used to report flower and plume separately.
pub fn compute_fixed_main_chance(main: MainStat, config: &SlotConfig) -> f64 {
    if config.min_stat_count == 0 && config.must_present.is_empty() {
        return 1.0;
    }
    secondary_chance(main, config).clamp(0.0, 1.0)
}

/// Pass probabilities of all four slots.
pub fn compute_slot_chances(config: &SetConfig) -> SlotChances {
    PerSlot::from_fn(|kind| compute_slot_chance(kind, config.slot(kind)))
}

/// Chance of `config` plus, when `k < min(4, |substats|)`, the chance of the
/// same rule with `k + 1`.
pub fn compute_slot_chance_detail(slot: SlotKind, config: &SlotConfig) -> SlotChanceDetail {
    let base = compute_slot_chance(slot, config);
    let ceiling = config.substats.len().min(SUBSTAT_DRAW_COUNT);

    let tightened = (usize::from(config.min_stat_count) < ceiling).then(|| {
        let stricter = SlotConfig {
            min_stat_count: config.min_stat_count + 1,
            ..config.clone()
        };
        TightenedChance {
            min_stat_count: stricter.min_stat_count,
            chance: compute_slot_chance(slot, &stricter),
        }
    });

    SlotChanceDetail { base, tightened }
}

pub fn compute_slot_chance_details(config: &SetConfig) -> SlotChanceDetails {
    PerSlot::from_fn(|kind| compute_slot_chance_detail(kind, config.slot(kind)))
}

/// Accepted concrete main stats with their drop probabilities.
fn main_stat_outcomes(slot: SlotKind, choices: &[MainStatChoice]) -> Vec<(MainStat, f64)> {
    let total = main_stat_total(slot);
    if total <= 0.0 {
        return Vec::new();
    }

    main_stat_pool(slot)
        .iter()
        .filter(|(stat, weight)| {
            *weight > 0.0
                && (!slot.has_main_stat_choice()
                    || choices.is_empty()
                    || choices.iter().any(|choice| choice.accepts(*stat)))
        })
        .map(|(stat, weight)| (*stat, weight / total))
        .collect()
}

/// Probability mass of the accepted main stats. Exactly 1 when the slot has
/// no main-stat choice or accepts every main stat.
fn main_factor(slot: SlotKind, config: &SlotConfig, mains: &[(MainStat, f64)]) -> f64 {
    if !slot.has_main_stat_choice() || config.main_stats.is_empty() {
        return 1.0;
    }
    mains.iter().map(|(_, probability)| probability).sum()
}

/// Probability that an item with main stat `main` passes the secondary-stat
/// part of `config`.
fn secondary_chance(main: MainStat, config: &SlotConfig) -> f64 {
    let covered = main.as_substat();
    let covered_set = covered.map_or(SubStatSet::empty(), SubStatSet::from);

    if config.must_present.difference(covered_set).len() > SUBSTAT_DRAW_COUNT {
        return 0.0;
    }

    let needed = usize::from(config.min_stat_count);
    DrawTable::new(covered)
        .outcomes()
        .filter(|(drawn, _)| {
            let available = drawn.union(covered_set);
            config.must_present.is_subset_of(available)
                && config.substats.intersection(available).len() >= needed
        })
        .map(|(_, probability)| probability)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SubStat;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn unconstrained_slot_always_passes() {
        for slot in SlotKind::all() {
            assert_eq!(compute_slot_chance(slot, &SlotConfig::unconstrained()), 1.0);
        }
    }

    #[test]
    fn main_stat_only_rule_is_the_drop_rate() {
        let config = SlotConfig::unconstrained().with_main_stats([MainStatChoice::AnyElemental]);
        assert_close(compute_slot_chance(SlotKind::Goblet, &config), 40.0 / 105.0);

        let crit = SlotConfig::unconstrained().with_main_stats([MainStatChoice::AnyCrit]);
        assert_close(compute_slot_chance(SlotKind::Circlet, &crit), 20.0 / 100.0);
    }

    #[test]
    fn main_stat_missing_from_slot_contributes_nothing() {
        let config = SlotConfig::unconstrained().with_main_stats([MainStat::EnergyRecharge.into()]);
        assert_eq!(compute_slot_chance(SlotKind::Goblet, &config), 0.0);
    }

    #[test]
    fn main_stat_counts_towards_the_rule() {
        let config = SlotConfig::new(SubStatSet::CRITS, SubStatSet::CRITS, 2);
        let with_crit_main = config.clone().with_main_stats([MainStat::CritRate.into()]);
        let with_atk_main = config.with_main_stats([MainStat::AtkPercent.into()]);

        let crit_circlet = compute_slot_chance(SlotKind::Circlet, &with_crit_main);
        let atk_circlet = compute_slot_chance(SlotKind::Circlet, &with_atk_main);
        // Scaled by the main-stat drop rate; a cr circlet only needs a cd roll.
        assert!(crit_circlet / 0.10 > atk_circlet / 0.22);
    }

    #[test]
    fn flower_plume_averages_both_pieces() {
        let config = SlotConfig::rigid(SubStatSet::FLAT_HP);
        // The flower always carries hp, so only the plume has to roll it.
        let plume = secondary_chance(MainStat::FlatAtk, &config);
        assert_eq!(compute_fixed_main_chance(MainStat::FlatHp, &config), 1.0);
        assert_close(
            compute_slot_chance(SlotKind::FlowerPlume, &config),
            (1.0 + plume) / 2.0,
        );
    }

    #[test]
    fn impossible_requirements_have_zero_chance() {
        // No sands main stat covers any of these.
        let five = SubStatSet::of(&[
            SubStat::CritRate,
            SubStat::CritDamage,
            SubStat::FlatAtk,
            SubStat::FlatHp,
            SubStat::FlatDef,
        ]);
        assert_eq!(compute_slot_chance(SlotKind::Sands, &SlotConfig::rigid(five)), 0.0);
    }

    #[test]
    fn unconstrained_set_passes_on_every_slot() {
        let chances = compute_slot_chances(&SetConfig::default());
        for slot in SlotKind::all() {
            assert_eq!(*chances.get(slot), 1.0, "{slot}");
        }

        let details = compute_slot_chance_details(&SetConfig::default());
        for slot in SlotKind::all() {
            assert_eq!(
                *details.get(slot),
                SlotChanceDetail {
                    base: 1.0,
                    tightened: None
                }
            );
        }
    }

    #[test]
    fn slots_are_estimated_independently() {
        let flower_plume = SlotConfig::new(SubStatSet::CRITS.with(SubStat::AtkPercent), SubStatSet::CRITS, 2);
        let config = SetConfig {
            flower_plume: flower_plume.clone(),
            ..SetConfig::default()
        };

        let chances = compute_slot_chances(&config);
        let expected = compute_slot_chance(SlotKind::FlowerPlume, &flower_plume);
        assert!(expected < 1.0);
        assert_eq!(chances.flower_plume, expected);
        assert_eq!(chances.sands, 1.0);
        assert_eq!(chances.goblet, 1.0);
        assert_eq!(chances.circlet, 1.0);

        let details = compute_slot_chance_details(&config);
        assert_eq!(
            details.flower_plume,
            compute_slot_chance_detail(SlotKind::FlowerPlume, &flower_plume)
        );
        assert_eq!(details.flower_plume.tightened.map(|t| t.min_stat_count), Some(3));
        assert_eq!(details.sands.base, 1.0);
    }

    #[test]
    fn detail_reports_the_stricter_count() {
        let config = SlotConfig::new(
            SubStatSet::CRITS.with(SubStat::AtkPercent).with(SubStat::EnergyRecharge),
            SubStatSet::CRITS,
            2,
        );
        let detail = compute_slot_chance_detail(SlotKind::Sands, &config);
        let tightened = detail.tightened.unwrap();
        assert_eq!(tightened.min_stat_count, 3);
        assert!(tightened.chance <= detail.base);

        let rigid = compute_slot_chance_detail(SlotKind::Sands, &SlotConfig::rigid(SubStatSet::CRITS));
        assert_eq!(rigid.tightened, None);
    }
}
