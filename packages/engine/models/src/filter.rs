//! Filter parameters accepted by the engine's filtering operations.
//!
//! Every predicate is optional. [`FilterValue::All`] (or an empty tag set,
//! or `None`) leaves the predicate out of the conjunction.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use scs_conecta_district_models::{
    AlertKind, AlertStatus, BusinessKind, BusinessStatus, EventCategory, HighlightLevel,
    PostCategory, ReactivationPotential, ZoneId,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Strings that mean "do not filter" in UI selectors.
const ALL_SENTINELS: &[&str] = &["all", "todas", "todos"];

/// A single-value filter: either everything passes, or only `T` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue<T> {
    /// No filter applied.
    All,
    /// Only entities whose field equals this value pass.
    Only(T),
}

impl<T: PartialEq> FilterValue<T> {
    /// Whether `value` passes this filter.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// Like [`Self::matches`] for optional fields. An entity without the
    /// field only passes when no filter is applied.
    #[must_use]
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected),
        }
    }
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> FilterValue<T> {
    /// Whether this filter is a no-op.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: FromStr> FilterValue<T> {
    /// Parses a UI selector value.
    ///
    /// The sentinels `all`, `todas` and `todos`, the empty string, and any
    /// value `T` fails to parse all yield [`FilterValue::All`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || ALL_SENTINELS
                .iter()
                .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
        {
            return Self::All;
        }

        trimmed.parse::<T>().map_or_else(
            |_| {
                log::debug!("Ignoring unrecognized filter value '{trimmed}'");
                Self::All
            },
            Self::Only,
        )
    }
}

impl<T> From<Option<T>> for FilterValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for FilterValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr> Deserialize<'de> for FilterValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::All, |raw| Self::parse_lenient(&raw)))
    }
}

/// Returns `true` when `requested` is empty or shares at least one tag with
/// `tags`.
#[must_use]
pub fn tags_intersect(requested: &BTreeSet<String>, tags: &BTreeSet<String>) -> bool {
    requested.is_empty() || requested.iter().any(|tag| tags.contains(tag))
}

/// Event list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventFilter {
    /// Zone equals.
    pub zone: FilterValue<ZoneId>,
    /// Category equals.
    pub category: FilterValue<EventCategory>,
    /// Highlight level equals.
    pub highlight: FilterValue<HighlightLevel>,
    /// Audience tags: at least one must match.
    pub audience: BTreeSet<String>,
    /// Support-need tags: at least one must match.
    pub support_needs: BTreeSet<String>,
    /// Start hour at or after this value (24h clock).
    pub min_start_hour: Option<u8>,
}

impl EventFilter {
    /// Filter for events starting at or after `hour`.
    #[must_use]
    pub fn nighttime(hour: u8) -> Self {
        Self {
            min_start_hour: Some(hour),
            ..Self::default()
        }
    }
}

/// Business list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessFilter {
    /// Zone equals.
    pub zone: FilterValue<ZoneId>,
    /// Kind equals.
    pub kind: FilterValue<BusinessKind>,
    /// Status equals.
    pub status: FilterValue<BusinessStatus>,
    /// Open-at-night flag equals.
    pub open_at_night: Option<bool>,
}

/// Safety alert filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertFilter {
    /// Zone equals.
    pub zone: FilterValue<ZoneId>,
    /// Kind equals.
    pub kind: FilterValue<AlertKind>,
    /// Status equals.
    pub status: FilterValue<AlertStatus>,
}

/// Vacant property filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFilter {
    /// Zone equals.
    pub zone: FilterValue<ZoneId>,
    /// Reactivation potential at least this level.
    pub min_potential: Option<ReactivationPotential>,
    /// Suggested-use tags: at least one must match.
    pub uses: BTreeSet<String>,
}

/// Forum ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PostSort {
    /// Net votes, pinned bonus.
    #[default]
    Popular,
    /// Newest first.
    Recent,
}

/// Forum query: filter plus ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostQuery {
    /// Category equals.
    pub category: FilterValue<PostCategory>,
    /// Zone equals.
    pub zone: FilterValue<ZoneId>,
    /// Case-insensitive substring of title, content or any tag.
    pub search: Option<String>,
    /// Result ordering.
    pub sort: PostSort,
}
