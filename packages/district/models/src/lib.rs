#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District entity types for the SCS Conecta data engine.
//!
//! Every collection the engine reads is defined here: zones (*quadras*),
//! events, businesses, safety alerts, zone risk profiles, vacant properties,
//! public spaces, forum posts and social-media publications. All types are
//! plain immutable data loaded from fixtures; nothing in this crate mutates
//! them after deserialization.
//!
//! Enum values serialize as `kebab-case` English names but also parse from
//! the Portuguese names used by the district's source data, so a fixture can
//! say either `high` or `alto`.

pub mod business;
pub mod channel;
pub mod clock;
pub mod event;
pub mod forum;
pub mod safety;
pub mod vacancy;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use business::{Business, BusinessKind, BusinessStatus};
pub use channel::{Channel, ChannelMetrics, Publication};
pub use clock::{ClockTime, DayOfWeek, DaySchedule, ParseClockError, TimeWindow, WeeklyHours};
pub use event::{Engagement, Event, EventCategory, HighlightLevel};
pub use forum::{Author, Post, PostCategory};
pub use safety::{AlertCorrelation, AlertKind, AlertStatus, SafetyAlert, ZoneRiskProfile};
pub use vacancy::{PropertyKind, PublicSpace, ReactivationPotential, VacantProperty};

/// Identifier of a district zone (e.g. `scs-1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    /// Creates a zone id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::str::FromStr for ZoneId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

/// A district zone as listed in the zone registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier.
    pub id: ZoneId,
    /// Display name (e.g. "SCS Quadra 1").
    pub name: String,
}

/// Three-step risk scale used for nighttime risk and property security.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RiskLevel {
    /// Low risk.
    #[serde(alias = "baixo")]
    #[strum(to_string = "low", serialize = "baixo")]
    Low,
    /// Medium risk.
    #[serde(alias = "medio")]
    #[strum(to_string = "medium", serialize = "medio")]
    Medium,
    /// High risk.
    #[serde(alias = "alto")]
    #[strum(to_string = "high", serialize = "alto")]
    High,
}

/// Entities located in a single zone.
pub trait Zoned {
    /// The entity's zone, `None` when it applies to the whole district.
    fn zone(&self) -> Option<&ZoneId>;
}

/// Entities carrying a set of free-form tags.
pub trait Tagged {
    /// The entity's tags. May be empty.
    fn tags(&self) -> &BTreeSet<String>;
}

/// Every collection the engine reads, as loaded from fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistrictDataset {
    /// Zone registry. Drives grouping and route planning.
    pub zones: Vec<Zone>,
    /// Scheduled events.
    pub events: Vec<Event>,
    /// Tracked commercial units.
    pub businesses: Vec<Business>,
    /// Community safety alerts.
    pub alerts: Vec<SafetyAlert>,
    /// Historical risk profile per zone.
    pub risk_profiles: Vec<ZoneRiskProfile>,
    /// Empty properties available for reactivation.
    pub vacant_properties: Vec<VacantProperty>,
    /// Public spaces available for events.
    pub public_spaces: Vec<PublicSpace>,
    /// Community forum posts.
    pub posts: Vec<Post>,
    /// Social-media publication history.
    pub publications: Vec<Publication>,
    /// Audience metrics per channel.
    pub channel_metrics: Vec<ChannelMetrics>,
}

impl DistrictDataset {
    /// Zone ids in registry order.
    #[must_use]
    pub fn zone_ids(&self) -> Vec<ZoneId> {
        self.zones.iter().map(|z| z.id.clone()).collect()
    }

    /// Display name for `zone`, falling back to the raw id for zones not in
    /// the registry.
    #[must_use]
    pub fn zone_name<'a>(&'a self, zone: &'a ZoneId) -> &'a str {
        self.zones
            .iter()
            .find(|z| &z.id == zone)
            .map_or_else(|| zone.as_str(), |z| z.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_portuguese_names() {
        assert_eq!("alto".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("medio".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!("baixo".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!(RiskLevel::High.to_string(), "high");
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn zone_name_falls_back_to_id() {
        let dataset = DistrictDataset {
            zones: vec![Zone {
                id: ZoneId::from("scs-1"),
                name: "SCS Quadra 1".to_string(),
            }],
            ..DistrictDataset::default()
        };
        assert_eq!(dataset.zone_name(&ZoneId::from("scs-1")), "SCS Quadra 1");
        assert_eq!(dataset.zone_name(&ZoneId::from("scs-9")), "scs-9");
    }
}
