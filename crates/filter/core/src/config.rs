/// Switches controlling how builds become filter configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ComputeOptions {
    /// Drop builds whose mandatory stats are exactly Crit Rate and Crit
    /// Damage; the game's own double-crit lock already keeps those items.
    pub skip_crit_builds: bool,
    /// Replace any elemental or physical goblet entry with `elemental%`.
    pub expand_elemental_goblet: bool,
    /// On 4-piece builds, replace a crit circlet entry with `cr/cd`.
    pub expand_crit_circlet: bool,
    /// Enable the single-flex merge pass.
    pub merge_single_flex_variants: bool,
    /// Enable the rigid common-subset merge pass.
    pub find_rigid_common_subset: bool,
}

impl ComputeOptions {
    pub const DEFAULT_SKIP_CRIT_BUILDS: bool = false;
    pub const DEFAULT_EXPAND_ELEMENTAL_GOBLET: bool = true;
    pub const DEFAULT_EXPAND_CRIT_CIRCLET: bool = true;
    pub const DEFAULT_MERGE_SINGLE_FLEX_VARIANTS: bool = true;
    pub const DEFAULT_FIND_RIGID_COMMON_SUBSET: bool = true;

    pub const fn new() -> Self {
        Self {
            skip_crit_builds: Self::DEFAULT_SKIP_CRIT_BUILDS,
            expand_elemental_goblet: Self::DEFAULT_EXPAND_ELEMENTAL_GOBLET,
            expand_crit_circlet: Self::DEFAULT_EXPAND_CRIT_CIRCLET,
            merge_single_flex_variants: Self::DEFAULT_MERGE_SINGLE_FLEX_VARIANTS,
            find_rigid_common_subset: Self::DEFAULT_FIND_RIGID_COMMON_SUBSET,
        }
    }

    /// Options with every broadening and optional merge pass disabled.
    pub const fn strict() -> Self {
        Self {
            skip_crit_builds: false,
            expand_elemental_goblet: false,
            expand_crit_circlet: false,
            merge_single_flex_variants: false,
            find_rigid_common_subset: false,
        }
    }

    /// Merge options derived from these compute options.
    pub const fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            merge_single_flex_variants: self.merge_single_flex_variants,
            find_rigid_common_subset: self.find_rigid_common_subset,
        }
    }
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Switches for the optional merge passes.
///
/// Both default to off: calling the merger directly only collapses identical
/// configurations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct MergeOptions {
    pub merge_single_flex_variants: bool,
    pub find_rigid_common_subset: bool,
}

impl MergeOptions {
    /// Both optional passes enabled.
    pub const fn all() -> Self {
        Self {
            merge_single_flex_variants: true,
            find_rigid_common_subset: true,
        }
    }
}

impl From<&ComputeOptions> for MergeOptions {
    fn from(options: &ComputeOptions) -> Self {
        options.merge_options()
    }
}

/// Partial [`ComputeOptions`], used to layer option sources.
///
/// Unset fields leave the underlying value untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ComputeOptionsOverrides {
    pub skip_crit_builds: Option<bool>,
    pub expand_elemental_goblet: Option<bool>,
    pub expand_crit_circlet: Option<bool>,
    pub merge_single_flex_variants: Option<bool>,
    pub find_rigid_common_subset: Option<bool>,
}

impl ComputeOptionsOverrides {
    /// Writes every set field over `base`.
    pub fn apply(&self, base: ComputeOptions) -> ComputeOptions {
        ComputeOptions {
            skip_crit_builds: self.skip_crit_builds.unwrap_or(base.skip_crit_builds),
            expand_elemental_goblet: self
                .expand_elemental_goblet
                .unwrap_or(base.expand_elemental_goblet),
            expand_crit_circlet: self.expand_crit_circlet.unwrap_or(base.expand_crit_circlet),
            merge_single_flex_variants: self
                .merge_single_flex_variants
                .unwrap_or(base.merge_single_flex_variants),
            find_rigid_common_subset: self
                .find_rigid_common_subset
                .unwrap_or(base.find_rigid_common_subset),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
