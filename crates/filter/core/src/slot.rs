//! Per-slot and per-set filter configurations.

use crate::error::{ParseStatError, SlotConfigError};
use crate::stats::{MainStatChoice, SubStatSet};

/// Logical artifact slot.
///
/// Flower and plume always carry flat HP and flat ATK respectively, so they
/// share a single filter slot without main-stat choice.
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
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SlotKind {
    FlowerPlume,
    Sands,
    Goblet,
    Circlet,
}

impl SlotKind {
    pub const COUNT: usize = 4;

    /// Returns all slots in display order.
    pub const fn all() -> [SlotKind; Self::COUNT] {
        [
            SlotKind::FlowerPlume,
            SlotKind::Sands,
            SlotKind::Goblet,
            SlotKind::Circlet,
        ]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Parses a slot identifier (`flowerPlume`, `sands`, `goblet`, `circlet`).
    pub fn from_identifier(raw: &str) -> Result<Self, ParseStatError> {
        raw.trim()
            .parse()
            .map_err(|_| ParseStatError::UnknownSlot(raw.trim().to_owned()))
    }

    /// True if the slot's main stat is chosen from a pool.
    pub const fn has_main_stat_choice(self) -> bool {
        !matches!(self, SlotKind::FlowerPlume)
    }
}

/// Filter rule for one slot.
///
/// An item matches when its main stat is accepted, every stat of
/// `must_present` is present, and at least `min_stat_count` of its stats lie
/// in `substats`.
///
/// Invariants: `must_present ⊆ substats` and
/// `|must_present| <= min_stat_count <= |substats|`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SlotConfig {
    /// Accepted main stats; empty means any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub main_stats: Vec<MainStatChoice>,
    /// Pool of acceptable secondary stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub substats: SubStatSet,
    /// Stats that must all be present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub must_present: SubStatSet,
    /// Minimum number of the item's stats inside `substats` (k).
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_stat_count: u8,
}

impl SlotConfig {
    /// A rule every item passes.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn new(substats: SubStatSet, must_present: SubStatSet, min_stat_count: u8) -> Self {
        Self {
            main_stats: Vec::new(),
            substats,
            must_present,
            min_stat_count,
        }
    }

    /// A rule where every listed stat is mandatory (`n = k`).
    pub fn rigid(stats: SubStatSet) -> Self {
        Self::new(stats, stats, stats.len() as u8)
    }

    #[must_use]
    pub fn with_main_stats(mut self, main_stats: impl IntoIterator<Item = MainStatChoice>) -> Self {
        self.main_stats = main_stats.into_iter().collect();
        self
    }

    /// Checks the structural invariants.
    pub fn validate(&self, kind: SlotKind) -> Result<(), SlotConfigError> {
        if !kind.has_main_stat_choice() && !self.main_stats.is_empty() {
            return Err(SlotConfigError::MainStatOnFixedSlot { slot: kind });
        }

        let outside = self.must_present.difference(self.substats);
        if !outside.is_empty() {
            return Err(SlotConfigError::MustPresentOutsidePool { outside });
        }

        if usize::from(self.min_stat_count) < self.must_present.len() {
            return Err(SlotConfigError::CountBelowMandatory {
                min_stat_count: self.min_stat_count,
                must_present: self.must_present.len(),
            });
        }

        if usize::from(self.min_stat_count) > self.substats.len() {
            return Err(SlotConfigError::CountAbovePool {
                min_stat_count: self.min_stat_count,
                pool: self.substats.len(),
            });
        }

        Ok(())
    }

    /// Stats of the pool that are not mandatory.
    pub fn optional_pool(&self) -> SubStatSet {
        self.substats.difference(self.must_present)
    }

    /// Number of stats the item needs beyond the mandatory ones.
    pub fn flexible_count(&self) -> usize {
        usize::from(self.min_stat_count).saturating_sub(self.must_present.len())
    }

    /// Every listed stat is mandatory and required (`must == substats`, `n = k`).
    pub fn is_rigid(&self) -> bool {
        self.must_present == self.substats && self.substats.len() == usize::from(self.min_stat_count)
    }

    /// Equal pool, mandatory set and count. Main stats are not compared.
    pub fn same_requirement(&self, other: &SlotConfig) -> bool {
        self.min_stat_count == other.min_stat_count
            && self.must_present == other.must_present
            && self.substats == other.substats
    }

    /// Equal in what the rule actually lets through on secondary stats.
    ///
    /// When no flexible stat is needed the optional pool never decides a
    /// match, so pools may differ.
    pub fn equivalent_requirement(&self, other: &SlotConfig) -> bool {
        if self.min_stat_count != other.min_stat_count || self.must_present != other.must_present {
            return false;
        }
        self.flexible_count() == 0 || self.substats == other.substats
    }
}

/// Bookkeeping for a character served by a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ServedCharacter {
    pub character_id: String,
    /// The configuration still states exactly this character's intent.
    pub has_perfect_merge: bool,
    /// At least one contributing build used a single 4-piece set.
    pub has_4pc_build: bool,
}

impl ServedCharacter {
    pub fn new(character_id: impl Into<String>, has_perfect_merge: bool, has_4pc_build: bool) -> Self {
        Self {
            character_id: character_id.into(),
            has_perfect_merge,
            has_4pc_build,
        }
    }
}

/// A complete filter rule for one equipment set: one slot rule per logical
/// slot, plus the characters it serves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SetConfig {
    pub flower_plume: SlotConfig,
    pub sands: SlotConfig,
    pub goblet: SlotConfig,
    pub circlet: SlotConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub served_characters: Vec<ServedCharacter>,
}

impl SetConfig {
    /// Builds a configuration from slot rules in [`SlotKind::all`] order.
    pub fn from_slots(slots: [SlotConfig; SlotKind::COUNT], served_characters: Vec<ServedCharacter>) -> Self {
        let [flower_plume, sands, goblet, circlet] = slots;
        Self {
            flower_plume,
            sands,
            goblet,
            circlet,
            served_characters,
        }
    }

    pub fn slot(&self, kind: SlotKind) -> &SlotConfig {
        match kind {
            SlotKind::FlowerPlume => &self.flower_plume,
            SlotKind::Sands => &self.sands,
            SlotKind::Goblet => &self.goblet,
            SlotKind::Circlet => &self.circlet,
        }
    }

    pub fn slot_mut(&mut self, kind: SlotKind) -> &mut SlotConfig {
        match kind {
            SlotKind::FlowerPlume => &mut self.flower_plume,
            SlotKind::Sands => &mut self.sands,
            SlotKind::Goblet => &mut self.goblet,
            SlotKind::Circlet => &mut self.circlet,
        }
    }

    /// Slot rules paired with their kind, in display order.
    pub fn slots(&self) -> [(SlotKind, &SlotConfig); SlotKind::COUNT] {
        SlotKind::all().map(|kind| (kind, self.slot(kind)))
    }

    pub fn served(&self, character_id: &str) -> Option<&ServedCharacter> {
        self.served_characters
            .iter()
            .find(|served| served.character_id == character_id)
    }

    /// Number of served characters with a 4-piece build.
    pub fn four_piece_count(&self) -> usize {
        self.served_characters
            .iter()
            .filter(|served| served.has_4pc_build)
            .count()
    }
}
