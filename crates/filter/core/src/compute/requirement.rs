//! Secondary-stat requirement of a single build.

use crate::build::Build;
use crate::slot::SlotConfig;
use crate::stats::SubStatSet;

/// Derives the slot rule (without main stats) shared by all four slots of
/// `build`.
///
/// The count is the build's override or the pool size, clamped so the rule
/// stays valid. Mandatory stats are the explicit ones (restricted to the
/// pool) or detected by [`detect_must_present`].
pub fn derive_requirement(build: &Build) -> SlotConfig {
    let substats = build.substats;
    let pool = substats.len() as u8;
    let requested = build.k_override.unwrap_or(pool).min(pool);

    let must_present = match build.must_present {
        Some(explicit) => explicit.intersection(substats),
        None => detect_must_present(substats, requested),
    };

    let min_stat_count = requested.max(must_present.len() as u8);
    SlotConfig::new(substats, must_present, min_stat_count)
}

/// Guesses which stats a build cannot do without.
///
/// - both crits, when listed and the count asks for at least two stats;
/// - every listed stat, when the count asks for all of them;
/// - nothing otherwise.
pub fn detect_must_present(substats: SubStatSet, min_stat_count: u8) -> SubStatSet {
    if substats.contains(SubStatSet::CRITS) && min_stat_count >= 2 {
        return SubStatSet::CRITS;
    }
    if !substats.is_empty() && usize::from(min_stat_count) == substats.len() {
        return substats;
    }
    SubStatSet::empty()
}
