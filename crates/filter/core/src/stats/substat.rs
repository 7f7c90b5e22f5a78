//! Secondary stats and compact sets of them.

use bitflags::bitflags;

/// A secondary stat type that can be rolled onto an artifact.
///
/// The discriminant doubles as the bit position inside [`SubStatSet`] and as
/// the index into the roll-weight table.
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
pub enum SubStat {
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

    #[strum(serialize = "atk")]
    #[cfg_attr(feature = "serde", serde(rename = "atk"))]
    FlatAtk = 7,

    #[strum(serialize = "hp")]
    #[cfg_attr(feature = "serde", serde(rename = "hp"))]
    FlatHp = 8,

    #[strum(serialize = "def")]
    #[cfg_attr(feature = "serde", serde(rename = "def"))]
    FlatDef = 9,
}

impl SubStat {
    /// Total number of secondary stat types.
    pub const COUNT: usize = 10;

    /// Returns all secondary stats in canonical order.
    pub const fn all() -> [SubStat; Self::COUNT] {
        [
            SubStat::CritRate,
            SubStat::CritDamage,
            SubStat::AtkPercent,
            SubStat::HpPercent,
            SubStat::DefPercent,
            SubStat::ElementalMastery,
            SubStat::EnergyRecharge,
            SubStat::FlatAtk,
            SubStat::FlatHp,
            SubStat::FlatDef,
        ]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// True for the two crit stats.
    pub const fn is_crit(self) -> bool {
        matches!(self, SubStat::CritRate | SubStat::CritDamage)
    }
}

bitflags! {
    /// A set of secondary stats, one bit per [`SubStat`].
    ///
    /// Iteration through [`SubStatSet::stats`] always follows canonical enum
    /// order, so two equal sets render identically.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SubStatSet: u16 {
        const CRIT_RATE         = 1 << 0;
        const CRIT_DAMAGE       = 1 << 1;
        const ATK_PERCENT       = 1 << 2;
        const HP_PERCENT        = 1 << 3;
        const DEF_PERCENT       = 1 << 4;
        const ELEMENTAL_MASTERY = 1 << 5;
        const ENERGY_RECHARGE   = 1 << 6;
        const FLAT_ATK          = 1 << 7;
        const FLAT_HP           = 1 << 8;
        const FLAT_DEF          = 1 << 9;

        /// Both crit stats, the in-game "double crit" auto-lock pattern.
        const CRITS = Self::CRIT_RATE.bits() | Self::CRIT_DAMAGE.bits();
    }
}

impl SubStatSet {
    /// Builds a set from a slice of stats (duplicates collapse).
    pub fn of(stats: &[SubStat]) -> Self {
        stats.iter().copied().collect()
    }

    /// Number of stats in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    #[inline]
    pub const fn has(self, stat: SubStat) -> bool {
        self.bits() & stat.bit() != 0
    }

    /// Returns a copy with `stat` added.
    #[must_use]
    pub const fn with(self, stat: SubStat) -> Self {
        Self::from_bits_retain(self.bits() | stat.bit())
    }

    /// Returns a copy with `stat` removed.
    #[must_use]
    pub const fn without(self, stat: SubStat) -> Self {
        Self::from_bits_retain(self.bits() & !stat.bit())
    }

    /// True if every stat of `self` is in `other`.
    #[inline]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.bits() & !other.bits() == 0
    }

    /// Stats of the set in canonical order.
    pub fn stats(self) -> impl Iterator<Item = SubStat> {
        SubStat::all().into_iter().filter(move |stat| self.has(*stat))
    }

    /// Returns the first `count` stats in canonical order.
    #[must_use]
    pub fn take_first(self, count: usize) -> Self {
        self.stats().take(count).collect()
    }
}

impl From<SubStat> for SubStatSet {
    fn from(stat: SubStat) -> Self {
        Self::from_bits_retain(stat.bit())
    }
}

impl FromIterator<SubStat> for SubStatSet {
    fn from_iter<I: IntoIterator<Item = SubStat>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SubStatSet::empty(), |set, stat| set.with(stat))
    }
}

impl core::fmt::Display for SubStatSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for stat in self.stats() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(stat.as_ref())?;
            first = false;
        }
        Ok(())
    }
}

// Sets travel as plain lists of stat identifiers (`["cr", "cd"]`).
#[cfg(feature = "serde")]
impl serde::Serialize for SubStatSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.stats())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SubStatSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stats = <Vec<SubStat> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(stats.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_matches_enum_order() {
        for stat in SubStat::all() {
            assert_eq!(SubStatSet::from(stat).bits(), 1 << stat.as_index());
        }
        assert_eq!(SubStatSet::all().len(), SubStat::COUNT);
    }

    #[test]
    fn parses_identifiers_case_insensitively() {
        assert_eq!("ATK%".parse::<SubStat>(), Ok(SubStat::AtkPercent));
        assert_eq!("em".parse::<SubStat>(), Ok(SubStat::ElementalMastery));
        assert!("spd".parse::<SubStat>().is_err());
    }

    #[test]
    fn set_operations() {
        let a = SubStatSet::of(&[SubStat::CritRate, SubStat::CritDamage, SubStat::AtkPercent]);
        let b = SubStatSet::of(&[SubStat::CritRate, SubStat::EnergyRecharge]);

        assert_eq!(a.len(), 3);
        assert_eq!(a.intersection(b), SubStatSet::CRIT_RATE);
        assert_eq!(a.union(b).len(), 4);
        assert!(SubStatSet::CRITS.is_subset_of(a));
        assert!(!b.is_subset_of(a));
        assert_eq!(a.without(SubStat::AtkPercent), SubStatSet::CRITS);
    }

    #[test]
    fn renders_in_canonical_order() {
        let set = SubStatSet::of(&[SubStat::EnergyRecharge, SubStat::CritDamage, SubStat::CritRate]);
        assert_eq!(set.to_string(), "cr, cd, er");
        assert_eq!(set.take_first(2), SubStatSet::CRITS);
    }
}
