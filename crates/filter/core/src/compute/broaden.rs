//! Main-stat broadening applied while builds are turned into rules.

use crate::stats::{MainStat, MainStatChoice, push_unique};

/// Main stats after broadening, and whether the build's intent changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Broadened {
    pub choices: Vec<MainStatChoice>,
    pub altered: bool,
}

impl Broadened {
    fn unchanged(choices: &[MainStatChoice]) -> Self {
        Self {
            choices: choices.to_vec(),
            altered: false,
        }
    }
}

/// Replaces elemental and physical goblet entries with `elemental%`.
///
/// Intent changes unless the build already accepted every damage bonus.
pub fn expand_elemental_goblet(choices: &[MainStatChoice]) -> Broadened {
    let is_elemental = |choice: &MainStatChoice| match choice {
        MainStatChoice::AnyElemental => true,
        MainStatChoice::Stat(stat) => stat.is_elemental(),
        MainStatChoice::AnyCrit => false,
    };
    if !choices.iter().any(is_elemental) {
        return Broadened::unchanged(choices);
    }

    let covers_all = choices.contains(&MainStatChoice::AnyElemental)
        || MainStat::ELEMENTAL
            .iter()
            .all(|stat| choices.contains(&MainStatChoice::Stat(*stat)));

    Broadened {
        choices: leading(MainStatChoice::AnyElemental, choices, is_elemental),
        altered: !covers_all,
    }
}

/// Replaces crit circlet entries with `cr/cd`.
///
/// Intent changes unless the build already accepted both crits.
pub fn expand_crit_circlet(choices: &[MainStatChoice]) -> Broadened {
    let is_crit = |choice: &MainStatChoice| match choice {
        MainStatChoice::AnyCrit => true,
        MainStatChoice::Stat(stat) => stat.is_crit(),
        MainStatChoice::AnyElemental => false,
    };
    if !choices.iter().any(is_crit) {
        return Broadened::unchanged(choices);
    }

    let covers_both = choices.contains(&MainStatChoice::AnyCrit)
        || (choices.contains(&MainStat::CritRate.into()) && choices.contains(&MainStat::CritDamage.into()));

    Broadened {
        choices: leading(MainStatChoice::AnyCrit, choices, is_crit),
        altered: !covers_both,
    }
}

/// `pseudo` followed by every choice `replaced` does not match.
fn leading(
    pseudo: MainStatChoice,
    choices: &[MainStatChoice],
    replaced: impl Fn(&MainStatChoice) -> bool,
) -> Vec<MainStatChoice> {
    let mut result = vec![pseudo];
    for choice in choices.iter().filter(|choice| !replaced(choice)) {
        push_unique(&mut result, *choice);
    }
    result
}
