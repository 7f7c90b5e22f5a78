//! Final shaping of merged configurations before they are shown.

use crate::slot::{SetConfig, SlotKind};
use crate::stats::{MainStat, MainStatChoice, push_unique};

/// Expands `cr/cd` back into both crit stats and orders main stats for
/// display.
pub fn finalize_config(mut config: SetConfig) -> SetConfig {
    for kind in SlotKind::all() {
        let slot = config.slot_mut(kind);
        slot.main_stats = finalize_main_stats(&slot.main_stats);
    }
    config
}

pub fn finalize_main_stats(choices: &[MainStatChoice]) -> Vec<MainStatChoice> {
    let mut expanded = Vec::with_capacity(choices.len() + 1);
    for choice in choices {
        match choice {
            MainStatChoice::AnyCrit => {
                push_unique(&mut expanded, MainStat::CritRate.into());
                push_unique(&mut expanded, MainStat::CritDamage.into());
            }
            other => push_unique(&mut expanded, *other),
        }
    }
    expanded.sort_by_key(|choice| choice.display_rank());
    expanded
}

/// Orders configurations by the number of 4-piece characters, then by the
/// number of characters served, both descending. Ties keep their order.
pub fn sort_configurations(configs: &mut [SetConfig]) {
    configs.sort_by(|a, b| {
        b.four_piece_count()
            .cmp(&a.four_piece_count())
            .then_with(|| b.served_characters.len().cmp(&a.served_characters.len()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::ServedCharacter;

    #[test]
    fn crit_pseudo_type_is_expanded_and_sorted() {
        let finalized = finalize_main_stats(&[
            MainStat::HealingBonus.into(),
            MainStatChoice::AnyCrit,
            MainStat::CritRate.into(),
        ]);
        assert_eq!(
            finalized,
            vec![
                MainStat::CritRate.into(),
                MainStat::CritDamage.into(),
                MainStat::HealingBonus.into()
            ]
        );
    }

    #[test]
    fn elemental_sorts_before_the_first_element() {
        let finalized = finalize_main_stats(&[
            MainStat::PyroDmg.into(),
            MainStatChoice::AnyElemental,
            MainStat::ElementalMastery.into(),
        ]);
        assert_eq!(
            finalized,
            vec![
                MainStat::ElementalMastery.into(),
                MainStatChoice::AnyElemental,
                MainStat::PyroDmg.into()
            ]
        );
    }

    #[test]
    fn most_four_piece_characters_first() {
        let served = |entries: &[(&str, bool)]| SetConfig {
            served_characters: entries
                .iter()
                .map(|(id, four)| ServedCharacter::new(*id, true, *four))
                .collect(),
            ..SetConfig::default()
        };
        let mut configs = vec![
            served(&[("a", false), ("b", false), ("c", false)]),
            served(&[("d", true)]),
            served(&[("e", true), ("f", false)]),
        ];
        sort_configurations(&mut configs);

        let firsts: Vec<_> = configs
            .iter()
            .map(|config| config.served_characters[0].character_id.as_str())
            .collect();
        assert_eq!(firsts, vec!["e", "d", "a"]);
    }
}
