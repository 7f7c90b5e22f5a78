//! Main stats and the main-stat choices a filter can accept.

use core::fmt;
use core::str::FromStr;

use super::SubStat;
use crate::error::ParseStatError;

/// A concrete main stat an artifact can carry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum MainStat {
    #[strum(serialize = "cr")]
    #[cfg_attr(feature = "serde", serde(rename = "cr"))]
    CritRate = 0,

    #[strum(serialize = "cd")]
    #[cfg_attr(feature = "serde", serde(rename = "cd"))]
    CritDamage = 1,

    #[strum(serialize = "atk%")]
    #[cfg_attr(feature = "serde", serde(rename = "atk%"))]
    AtkPercent = 2,

    #[strum(serialize = "hp%")]
    #[cfg_attr(feature = "serde", serde(rename = "hp%"))]
    HpPercent = 3,

    #[strum(serialize = "def%")]
    #[cfg_attr(feature = "serde", serde(rename = "def%"))]
    DefPercent = 4,

    #[strum(serialize = "em")]
    #[cfg_attr(feature = "serde", serde(rename = "em"))]
    ElementalMastery = 5,

    #[strum(serialize = "er")]
    #[cfg_attr(feature = "serde", serde(rename = "er"))]
    EnergyRecharge = 6,

    #[strum(serialize = "pyro%")]
    #[cfg_attr(feature = "serde", serde(rename = "pyro%"))]
    PyroDmg = 7,

    #[strum(serialize = "hydro%")]
    #[cfg_attr(feature = "serde", serde(rename = "hydro%"))]
    HydroDmg = 8,

    #[strum(serialize = "anemo%")]
    #[cfg_attr(feature = "serde", serde(rename = "anemo%"))]
    AnemoDmg = 9,

    #[strum(serialize = "electro%")]
    #[cfg_attr(feature = "serde", serde(rename = "electro%"))]
    ElectroDmg = 10,

    #[strum(serialize = "dendro%")]
    #[cfg_attr(feature = "serde", serde(rename = "dendro%"))]
    DendroDmg = 11,

    #[strum(serialize = "cryo%")]
    #[cfg_attr(feature = "serde", serde(rename = "cryo%"))]
    CryoDmg = 12,

    #[strum(serialize = "geo%")]
    #[cfg_attr(feature = "serde", serde(rename = "geo%"))]
    GeoDmg = 13,

    #[strum(serialize = "phys%")]
    #[cfg_attr(feature = "serde", serde(rename = "phys%"))]
    PhysicalDmg = 14,

    #[strum(serialize = "heal%")]
    #[cfg_attr(feature = "serde", serde(rename = "heal%"))]
    HealingBonus = 15,

    #[strum(serialize = "atk")]
    #[cfg_attr(feature = "serde", serde(rename = "atk"))]
    FlatAtk = 16,

    #[strum(serialize = "hp")]
    #[cfg_attr(feature = "serde", serde(rename = "hp"))]
    FlatHp = 17,
}

static ALL_MAIN_STATS: [MainStat; MainStat::COUNT] = MainStat::all();

impl MainStat {
    /// Total number of main stat types.
    pub const COUNT: usize = 18;

    /// Damage bonuses covered by the `elemental%` pseudo-type.
    ///
    /// Physical is included: players assign it at pickup like any element.
    pub const ELEMENTAL: [MainStat; 8] = [
        MainStat::PyroDmg,
        MainStat::HydroDmg,
        MainStat::AnemoDmg,
        MainStat::ElectroDmg,
        MainStat::DendroDmg,
        MainStat::CryoDmg,
        MainStat::GeoDmg,
        MainStat::PhysicalDmg,
    ];

    /// Returns all main stats in canonical order.
    pub const fn all() -> [MainStat; Self::COUNT] {
        [
            MainStat::CritRate,
            MainStat::CritDamage,
            MainStat::AtkPercent,
            MainStat::HpPercent,
            MainStat::DefPercent,
            MainStat::ElementalMastery,
            MainStat::EnergyRecharge,
            MainStat::PyroDmg,
            MainStat::HydroDmg,
            MainStat::AnemoDmg,
            MainStat::ElectroDmg,
            MainStat::DendroDmg,
            MainStat::CryoDmg,
            MainStat::GeoDmg,
            MainStat::PhysicalDmg,
            MainStat::HealingBonus,
            MainStat::FlatAtk,
            MainStat::FlatHp,
        ]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// True for elemental and physical damage bonuses.
    pub const fn is_elemental(self) -> bool {
        matches!(
            self,
            MainStat::PyroDmg
                | MainStat::HydroDmg
                | MainStat::AnemoDmg
                | MainStat::ElectroDmg
                | MainStat::DendroDmg
                | MainStat::CryoDmg
                | MainStat::GeoDmg
                | MainStat::PhysicalDmg
        )
    }

    pub const fn is_crit(self) -> bool {
        matches!(self, MainStat::CritRate | MainStat::CritDamage)
    }

    /// The secondary stat of the same type, if there is one.
    ///
    /// An artifact never rolls its main stat as a secondary stat.
    pub const fn as_substat(self) -> Option<SubStat> {
        match self {
            MainStat::CritRate => Some(SubStat::CritRate),
            MainStat::CritDamage => Some(SubStat::CritDamage),
            MainStat::AtkPercent => Some(SubStat::AtkPercent),
            MainStat::HpPercent => Some(SubStat::HpPercent),
            MainStat::DefPercent => Some(SubStat::DefPercent),
            MainStat::ElementalMastery => Some(SubStat::ElementalMastery),
            MainStat::EnergyRecharge => Some(SubStat::EnergyRecharge),
            MainStat::FlatAtk => Some(SubStat::FlatAtk),
            MainStat::FlatHp => Some(SubStat::FlatHp),
            _ => None,
        }
    }

    fn as_slice(self) -> &'static [MainStat] {
        let index = self.as_index();
        &ALL_MAIN_STATS[index..=index]
    }
}

/// One entry of a slot's accepted main stats.
///
/// Besides concrete stats, a filter may accept a pseudo-type standing for a
/// family of stats: `elemental%` (any damage bonus, assigned by hand at
/// pickup) or `cr/cd` (either crit stat).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MainStatChoice {
    Stat(MainStat),
    AnyElemental,
    AnyCrit,
}

impl MainStatChoice {
    pub const ANY_ELEMENTAL: &'static str = "elemental%";
    pub const ANY_CRIT: &'static str = "cr/cd";

    /// Concrete main stats this choice accepts.
    pub fn concrete(self) -> &'static [MainStat] {
        const CRITS: [MainStat; 2] = [MainStat::CritRate, MainStat::CritDamage];
        match self {
            MainStatChoice::Stat(stat) => stat.as_slice(),
            MainStatChoice::AnyElemental => &MainStat::ELEMENTAL,
            MainStatChoice::AnyCrit => &CRITS,
        }
    }

    pub fn accepts(self, stat: MainStat) -> bool {
        self.concrete().contains(&stat)
    }

    /// Position used when listing choices.
    ///
    /// `cr/cd` sorts with the crits and `elemental%` right before the first
    /// element.
    pub const fn display_rank(self) -> usize {
        match self {
            MainStatChoice::AnyCrit => 0,
            MainStatChoice::AnyElemental => 2 * MainStat::PyroDmg.as_index(),
            MainStatChoice::Stat(stat) => 2 * stat.as_index() + 1,
        }
    }
}

impl From<MainStat> for MainStatChoice {
    fn from(stat: MainStat) -> Self {
        MainStatChoice::Stat(stat)
    }
}

impl fmt::Display for MainStatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainStatChoice::Stat(stat) => f.write_str(stat.as_ref()),
            MainStatChoice::AnyElemental => f.write_str(Self::ANY_ELEMENTAL),
            MainStatChoice::AnyCrit => f.write_str(Self::ANY_CRIT),
        }
    }
}

impl FromStr for MainStatChoice {
    type Err = ParseStatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ANY_ELEMENTAL) {
            return Ok(MainStatChoice::AnyElemental);
        }
        if trimmed.eq_ignore_ascii_case(Self::ANY_CRIT) {
            return Ok(MainStatChoice::AnyCrit);
        }
        trimmed
            .parse::<MainStat>()
            .map(MainStatChoice::Stat)
            .map_err(|_| ParseStatError::UnknownMainStat(trimmed.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MainStatChoice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MainStatChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Appends `choice` unless it is already listed.
pub fn push_unique(choices: &mut Vec<MainStatChoice>, choice: MainStatChoice) {
    if !choices.contains(&choice) {
        choices.push(choice);
    }
}

/// Order-preserving union of two choice lists.
pub fn union_choices(first: &[MainStatChoice], second: &[MainStatChoice]) -> Vec<MainStatChoice> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    for choice in first.iter().chain(second) {
        push_unique(&mut merged, *choice);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_types_round_trip_through_strings() {
        for raw in ["elemental%", "cr/cd", "pyro%", "heal%", "atk"] {
            let choice: MainStatChoice = raw.parse().unwrap();
            assert_eq!(choice.to_string(), raw);
        }
        assert_eq!("CR/CD".parse::<MainStatChoice>(), Ok(MainStatChoice::AnyCrit));
    }

    #[test]
    fn unknown_identifier_is_a_typed_error() {
        assert_eq!(
            "spd%".parse::<MainStatChoice>(),
            Err(ParseStatError::UnknownMainStat("spd%".into()))
        );
    }

    #[test]
    fn concrete_expansion() {
        assert_eq!(MainStatChoice::AnyElemental.concrete().len(), 8);
        assert!(MainStatChoice::AnyElemental.accepts(MainStat::PhysicalDmg));
        assert!(!MainStatChoice::AnyElemental.accepts(MainStat::HealingBonus));
        assert_eq!(
            MainStatChoice::AnyCrit.concrete(),
            &[MainStat::CritRate, MainStat::CritDamage]
        );
        assert_eq!(MainStatChoice::Stat(MainStat::GeoDmg).concrete(), &[MainStat::GeoDmg]);
    }

    #[test]
    fn main_stat_never_rolls_as_its_own_substat() {
        assert_eq!(MainStat::FlatHp.as_substat(), Some(SubStat::FlatHp));
        assert_eq!(MainStat::PyroDmg.as_substat(), None);
        assert_eq!(MainStat::HealingBonus.as_substat(), None);
    }

    #[test]
    fn union_keeps_first_seen_order() {
        let a = [MainStat::AtkPercent.into(), MainStatChoice::AnyElemental];
        let b = [MainStatChoice::AnyElemental, MainStat::HpPercent.into()];
        assert_eq!(
            union_choices(&a, &b),
            vec![
                MainStat::AtkPercent.into(),
                MainStatChoice::AnyElemental,
                MainStat::HpPercent.into()
            ]
        );
    }
}
