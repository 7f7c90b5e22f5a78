//! Artifact filter configuration engine.
//!
//! `filter-core` turns per-character build requests into per-set equipment
//! filter rules, merges compatible rules so players maintain fewer of them,
//! and estimates how often a random item passes each rule. Everything here is
//! pure and synchronous; loaders and front ends live in other crates and
//! depend on the types re-exported here.
pub mod build;
pub mod chance;
pub mod compute;
pub mod config;
pub mod error;
pub mod merge;
pub mod slot;
pub mod stats;

pub use build::{Build, BuildGroup, Composition, FilterGroup, FilterKey};
pub use chance::{
    PerSlot, SlotChanceDetail, SlotChanceDetails, SlotChances, TightenedChance,
    compute_fixed_main_chance, compute_slot_chance, compute_slot_chance_detail,
    compute_slot_chance_details, compute_slot_chances,
};
pub use compute::{compute_artifact_filters, compute_filter_rules};
pub use config::{ComputeOptions, ComputeOptionsOverrides, MergeOptions};
pub use error::{ParseStatError, SlotConfigError};
pub use merge::{MergePass, MergePipeline, simple_merge};
pub use slot::{ServedCharacter, SetConfig, SlotConfig, SlotKind};
pub use stats::{MainStat, MainStatChoice, SubStat, SubStatSet, parse_main_stat_list, parse_substat_list};
