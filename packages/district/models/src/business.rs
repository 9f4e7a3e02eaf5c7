//! Tracked commercial units.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{WeeklyHours, ZoneId, Zoned};

/// Kind of commercial unit.
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
pub enum BusinessKind {
    /// Bars and pubs.
    Bar,
    /// Restaurants and cafes.
    #[serde(alias = "restaurante")]
    #[strum(to_string = "restaurant", serialize = "restaurante")]
    Restaurant,
    /// Offices and service providers.
    #[serde(alias = "servico")]
    #[strum(to_string = "service", serialize = "servico")]
    Service,
    /// An empty unit.
    #[serde(alias = "vazio")]
    #[strum(to_string = "vacant", serialize = "vazio")]
    Vacant,
    /// A square or open area.
    #[serde(alias = "espaco-publico")]
    #[strum(to_string = "public-space", serialize = "espaco-publico")]
    PublicSpace,
}

/// Whether a unit is operating.
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
pub enum BusinessStatus {
    /// Open for business.
    #[serde(alias = "ativo")]
    #[strum(to_string = "active", serialize = "ativo")]
    Active,
    /// Empty.
    #[serde(alias = "vazio")]
    #[strum(to_string = "vacant", serialize = "vazio")]
    Vacant,
}

/// A commercial unit in the district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Unique id (e.g. `com-001`).
    pub id: String,
    /// Trading name.
    pub name: String,
    /// Unit kind.
    pub kind: BusinessKind,
    /// Zone the unit is in.
    pub zone: ZoneId,
    /// Whether the unit advertises nighttime opening.
    #[serde(default)]
    pub open_at_night: bool,
    /// Weekly operating hours.
    #[serde(default)]
    pub hours: WeeklyHours,
    /// Operating status.
    pub status: BusinessStatus,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
}

impl Zoned for Business {
    fn zone(&self) -> Option<&ZoneId> {
        Some(&self.zone)
    }
}
