//! Community safety alerts and per-zone historical risk.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{RiskLevel, TimeWindow, ZoneId, Zoned};

/// What was reported.
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
pub enum AlertKind {
    /// Someone acting suspiciously.
    #[serde(alias = "atividade-suspeita")]
    #[strum(to_string = "suspicious-activity", serialize = "atividade-suspeita")]
    SuspiciousActivity,
    /// A threatening situation.
    #[serde(alias = "ameaca")]
    #[strum(to_string = "threat", serialize = "ameaca")]
    Threat,
    /// Robbery or attempted robbery.
    #[serde(alias = "assalto")]
    #[strum(to_string = "robbery", serialize = "assalto")]
    Robbery,
    /// Anything else.
    #[serde(alias = "outro")]
    #[strum(to_string = "other", serialize = "outro")]
    Other,
}

/// Handling state of an alert.
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
pub enum AlertStatus {
    /// Received, nobody assigned yet.
    #[serde(alias = "reportado")]
    #[strum(to_string = "reported", serialize = "reportado")]
    Reported,
    /// Being handled.
    #[serde(alias = "em-atendimento")]
    #[strum(to_string = "in-progress", serialize = "em-atendimento")]
    InProgress,
    /// Closed.
    #[serde(alias = "resolvido")]
    #[strum(to_string = "resolved", serialize = "resolvido")]
    Resolved,
}

impl AlertStatus {
    /// Whether the alert still needs attention.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Reported | Self::InProgress)
    }
}

/// Context captured when the alert was filed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCorrelation {
    /// Events active in the same zone at alert time.
    #[serde(default)]
    pub active_events: u32,
}

/// A community safety alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAlert {
    /// Unique id (e.g. `alt-001`).
    pub id: String,
    /// What was reported.
    pub kind: AlertKind,
    /// Zone of the report.
    pub zone: ZoneId,
    /// Local date-time of the report.
    pub timestamp: NaiveDateTime,
    /// Handling state.
    pub status: AlertStatus,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Whether the reporter stayed anonymous.
    #[serde(default = "default_true")]
    pub anonymous: bool,
    /// Whether staff verified the report.
    #[serde(default)]
    pub verified: bool,
    /// Correlation with concurrent events.
    #[serde(default)]
    pub correlation: AlertCorrelation,
}

const fn default_true() -> bool {
    true
}

impl Zoned for SafetyAlert {
    fn zone(&self) -> Option<&ZoneId> {
        Some(&self.zone)
    }
}

/// Historical risk pattern for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRiskProfile {
    /// The zone.
    pub zone: ZoneId,
    /// Nighttime risk level.
    pub nighttime_risk: RiskLevel,
    /// Windows with historically more incidents.
    #[serde(default)]
    pub critical_windows: Vec<TimeWindow>,
    /// Correlation between events and incidents, 0 to 1.
    #[serde(default)]
    pub event_correlation: f64,
}

impl Zoned for ZoneRiskProfile {
    fn zone(&self) -> Option<&ZoneId> {
        Some(&self.zone)
    }
}
