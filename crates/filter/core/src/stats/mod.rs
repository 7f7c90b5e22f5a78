//! Stat identifiers and their weight tables.
//!
//! Stat types are closed enums; every identifier the engine sees has already
//! been resolved to one of them, so table lookups are exhaustive matches
//! rather than string lookups.

mod main_stat;
mod substat;
pub mod tables;

pub use main_stat::{MainStat, MainStatChoice, push_unique, union_choices};
pub use substat::{SubStat, SubStatSet};

use crate::error::ParseStatError;

/// Parses a comma-separated list of secondary stats (`"cr, cd, er"`).
///
/// Empty items are skipped, so an empty string yields an empty set.
pub fn parse_substat_list(raw: &str) -> Result<SubStatSet, ParseStatError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<SubStat>()
                .map_err(|_| ParseStatError::UnknownSubStat(item.to_owned()))
        })
        .collect()
}

/// Parses a comma-separated list of main stat choices, dropping duplicates.
pub fn parse_main_stat_list(raw: &str) -> Result<Vec<MainStatChoice>, ParseStatError> {
    let mut choices = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        push_unique(&mut choices, item.parse()?);
    }
    Ok(choices)
}
