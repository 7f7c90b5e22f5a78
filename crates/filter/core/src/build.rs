//! Character build requests and the keyed groups the filter computer emits.

use core::fmt;

use crate::slot::SetConfig;
use crate::stats::{MainStatChoice, SubStatSet};

/// Set bonus layout of a build.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "composition"))]
pub enum Composition {
    /// Four pieces of one set.
    #[cfg_attr(feature = "serde", serde(rename = "4pc", rename_all = "camelCase"))]
    FourPiece { artifact_set: String },
    /// Two pieces each of two sets.
    #[cfg_attr(feature = "serde", serde(rename = "2pc+2pc", rename_all = "camelCase"))]
    TwoPlusTwo { first_set: String, second_set: String },
}

impl Composition {
    pub fn is_four_piece(&self) -> bool {
        matches!(self, Composition::FourPiece { .. })
    }

    /// Key of the equipment set(s) this composition targets.
    ///
    /// Returns `None` when a set identifier is blank.
    pub fn filter_key(&self) -> Option<FilterKey> {
        match self {
            Composition::FourPiece { artifact_set } => {
                let set = artifact_set.trim();
                (!set.is_empty()).then(|| FilterKey::Set(set.to_owned()))
            }
            Composition::TwoPlusTwo {
                first_set,
                second_set,
            } => {
                let (first, second) = (first_set.trim(), second_set.trim());
                if first.is_empty() || second.is_empty() {
                    return None;
                }
                Some(FilterKey::pair(first, second))
            }
        }
    }
}

#[cfg(feature = "serde")]
fn default_visible() -> bool {
    true
}

/// One requested equipment layout for a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Build {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Invisible builds are ignored by the filter computer.
    #[cfg_attr(feature = "serde", serde(default = "default_visible"))]
    pub visible: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub composition: Composition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sands: Vec<MainStatChoice>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub goblet: Vec<MainStatChoice>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub circlet: Vec<MainStatChoice>,
    /// Acceptable secondary stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub substats: SubStatSet,
    /// Explicit mandatory stats; detected from `substats` when absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub must_present: Option<SubStatSet>,
    /// Explicit minimum stat count; `|substats|` when absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub k_override: Option<u8>,
}

impl Build {
    pub fn new(id: impl Into<String>, composition: Composition, substats: SubStatSet) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            visible: true,
            composition,
            sands: Vec::new(),
            goblet: Vec::new(),
            circlet: Vec::new(),
            substats,
            must_present: None,
            k_override: None,
        }
    }

    /// A 4-piece build of `artifact_set`.
    pub fn four_piece(id: impl Into<String>, artifact_set: impl Into<String>, substats: SubStatSet) -> Self {
        Self::new(
            id,
            Composition::FourPiece {
                artifact_set: artifact_set.into(),
            },
            substats,
        )
    }

    /// A 2pc+2pc build of `first_set` and `second_set`.
    pub fn two_plus_two(
        id: impl Into<String>,
        first_set: impl Into<String>,
        second_set: impl Into<String>,
        substats: SubStatSet,
    ) -> Self {
        Self::new(
            id,
            Composition::TwoPlusTwo {
                first_set: first_set.into(),
                second_set: second_set.into(),
            },
            substats,
        )
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_sands(mut self, choices: impl IntoIterator<Item = MainStatChoice>) -> Self {
        self.sands = choices.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_goblet(mut self, choices: impl IntoIterator<Item = MainStatChoice>) -> Self {
        self.goblet = choices.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_circlet(mut self, choices: impl IntoIterator<Item = MainStatChoice>) -> Self {
        self.circlet = choices.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_must_present(mut self, must_present: SubStatSet) -> Self {
        self.must_present = Some(must_present);
        self
    }

    #[must_use]
    pub fn with_min_stat_count(mut self, min_stat_count: u8) -> Self {
        self.k_override = Some(min_stat_count);
        self
    }
}

/// All builds of one character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BuildGroup {
    pub character_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub builds: Vec<Build>,
    /// Hidden groups are ignored by the filter computer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,
}

impl BuildGroup {
    pub fn new(character_id: impl Into<String>, builds: Vec<Build>) -> Self {
        Self {
            character_id: character_id.into(),
            builds,
            hidden: false,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Equipment set (or unordered pair of sets) a configuration applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKey {
    Set(String),
    /// Stored with the smaller identifier first.
    Pair(String, String),
}

impl FilterKey {
    /// Builds an unordered pair key.
    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        let (first, second) = (first.into(), second.into());
        if first <= second {
            FilterKey::Pair(first, second)
        } else {
            FilterKey::Pair(second, first)
        }
    }

    /// Parses the display form (`set` or `a+b`).
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('+') {
            Some((first, second)) => FilterKey::pair(first.trim(), second.trim()),
            None => FilterKey::Set(raw.trim().to_owned()),
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, FilterKey::Pair(..))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::Set(set) => f.write_str(set),
            FilterKey::Pair(first, second) => write!(f, "{first}+{second}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FilterKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FilterKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Ok(FilterKey::parse(&raw))
    }
}

/// Configurations targeting one [`FilterKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FilterGroup {
    #[cfg_attr(feature = "serde", serde(rename = "setId"))]
    pub key: FilterKey,
    pub configurations: Vec<SetConfig>,
}

impl FilterGroup {
    pub fn new(key: FilterKey) -> Self {
        Self {
            key,
            configurations: Vec::new(),
        }
    }
}
