//! Error types for filter-core.
//!
//! The computations themselves are total: empty input gives empty output and
//! impossible requirements give a probability of zero. Errors only arise at
//! the edges, when identifiers are parsed or when an untrusted slot
//! configuration is checked before use.

use crate::slot::SlotKind;
use crate::stats::SubStatSet;

/// An identifier that does not name a known stat or slot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseStatError {
    #[error("unknown secondary stat `{0}`")]
    UnknownSubStat(String),

    #[error("unknown main stat `{0}`")]
    UnknownMainStat(String),

    #[error("unknown slot `{0}` (expected flowerPlume, sands, goblet or circlet)")]
    UnknownSlot(String),
}

/// A [`SlotConfig`](crate::SlotConfig) that breaks one of its invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotConfigError {
    #[error("mandatory stats [{outside}] are not part of the accepted pool")]
    MustPresentOutsidePool { outside: SubStatSet },

    #[error("minimum stat count {min_stat_count} is below the {must_present} mandatory stats")]
    CountBelowMandatory { min_stat_count: u8, must_present: usize },

    #[error("minimum stat count {min_stat_count} exceeds the pool of {pool} stats")]
    CountAbovePool { min_stat_count: u8, pool: usize },

    #[error("{slot} has a fixed main stat and cannot filter on main stats")]
    MainStatOnFixedSlot { slot: SlotKind },
}
