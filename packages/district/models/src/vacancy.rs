//! Vacant properties and public spaces tracked for reactivation.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{RiskLevel, Tagged, ZoneId, Zoned};

/// Kind of empty property.
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
pub enum PropertyKind {
    /// Street-level shop.
    #[serde(alias = "comercial")]
    #[strum(to_string = "commercial", serialize = "comercial")]
    Commercial,
    /// Office room or floor.
    #[serde(alias = "escritorio")]
    #[strum(to_string = "office", serialize = "escritorio")]
    Office,
    /// Anything else.
    #[serde(alias = "outro")]
    #[strum(to_string = "other", serialize = "outro")]
    Other,
}

/// How promising a property is for reactivation. Ordered from lowest to
/// highest.
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
pub enum ReactivationPotential {
    #[serde(alias = "baixo")]
    #[strum(to_string = "low", serialize = "baixo")]
    Low,
    #[serde(alias = "medio")]
    #[strum(to_string = "medium", serialize = "medio")]
    Medium,
    #[serde(alias = "alto")]
    #[strum(to_string = "high", serialize = "alto")]
    High,
    #[serde(alias = "muito-alto")]
    #[strum(to_string = "very-high", serialize = "muito-alto")]
    VeryHigh,
}

/// An empty unit waiting for a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacantProperty {
    /// Unique id (e.g. `vazio-001`).
    pub id: String,
    /// Listing name.
    pub name: String,
    /// Property kind.
    pub kind: PropertyKind,
    /// Zone of the property.
    pub zone: ZoneId,
    /// Floor area in square metres.
    pub area_m2: f64,
    /// Date the last tenant left.
    pub vacant_since: NaiveDate,
    /// Asking rent per month.
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    /// Reactivation potential.
    pub reactivation_potential: ReactivationPotential,
    /// Suggested new uses (e.g. `cafe`, `coworking`).
    #[serde(default)]
    pub suggested_uses: BTreeSet<String>,
    /// Perceived security risk around the property.
    pub security_risk: RiskLevel,
}

impl Zoned for VacantProperty {
    fn zone(&self) -> Option<&ZoneId> {
        Some(&self.zone)
    }
}

impl Tagged for VacantProperty {
    fn tags(&self) -> &BTreeSet<String> {
        &self.suggested_uses
    }
}

/// A public space that can host events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSpace {
    /// Unique id.
    pub id: String,
    /// Name.
    pub name: String,
    /// Zone of the space.
    pub zone: ZoneId,
    /// Approximate capacity in people.
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl Zoned for PublicSpace {
    fn zone(&self) -> Option<&ZoneId> {
        Some(&self.zone)
    }
}
