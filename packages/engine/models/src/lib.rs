#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query parameters and derived result records for the district data engine.
//!
//! Filter inputs live in [`filter`]; everything else here is an output
//! record the engine builds fresh on every call. Output records serialize as
//! `camelCase` JSON for display surfaces. Rates that cannot be computed
//! (division by zero) are `None` and serialize as `null`.

pub mod filter;

use scs_conecta_district_models::{Channel, ClockTime, TimeWindow, ZoneId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use filter::{
    AlertFilter, BusinessFilter, EventFilter, FilterValue, PostQuery, PostSort, PropertyFilter,
};

/// Number of entities in one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCount {
    /// The zone.
    pub zone: ZoneId,
    /// Entity count.
    pub count: u64,
}

/// Number of entities sharing a label (category, kind, hour band).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Group label.
    pub label: String,
    /// Entity count.
    pub count: u64,
}

/// A named engagement counter on events.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum EngagementMetric {
    /// Listing views.
    Views,
    /// QR code scans.
    QrScans,
    /// Attendance confirmations.
    Confirmations,
}

/// Active versus vacant commercial units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    /// Units with status active.
    pub active: u64,
    /// Units with status vacant.
    pub vacant: u64,
    /// `active / (active + vacant)` as a percentage, one decimal. `None`
    /// when no units are tracked.
    pub rate: Option<f64>,
}

/// Engagement counters of one event, for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEngagementRow {
    /// Event id.
    pub event_id: String,
    /// Event title.
    pub title: String,
    /// Listing views.
    pub views: u64,
    /// QR code scans.
    pub qr_scans: u64,
    /// Attendance confirmations.
    pub confirmations: u64,
}

/// Management dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total events.
    pub event_count: u64,
    /// Events per zone.
    pub events_by_zone: Vec<ZoneCount>,
    /// Business occupancy.
    pub occupancy: OccupancySummary,
    /// Total alerts.
    pub alert_count: u64,
    /// Alerts per kind.
    pub alerts_by_kind: Vec<LabelCount>,
    /// Total QR scans across events.
    pub total_qr_scans: u64,
    /// Per-event engagement.
    pub engagement: Vec<EventEngagementRow>,
}

/// Safety panel figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyStats {
    /// Total alerts.
    pub total: u64,
    /// Alerts inside the short recent window.
    pub recent: u64,
    /// Alerts inside the long recent window.
    pub monthly: u64,
    /// Resolved alerts.
    pub resolved: u64,
    /// Reported or in-progress alerts.
    pub active: u64,
    /// Verified alerts.
    pub verified: u64,
    /// Resolved share of all alerts, one decimal. `None` without alerts.
    pub resolution_rate: Option<f64>,
    /// `round((1 - mean zone risk) * 100)`. `None` without risk profiles.
    pub safety_index: Option<u8>,
    /// Alerts per kind.
    pub by_kind: Vec<LabelCount>,
    /// Alerts per zone.
    pub by_zone: Vec<ZoneCount>,
    /// Alerts per four-hour band, in band order.
    pub by_hour_band: Vec<LabelCount>,
}

/// Vacancy panel figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyStats {
    /// Vacant properties.
    pub vacant_count: u64,
    /// Public spaces.
    pub public_space_count: u64,
    /// Sum of vacant floor area in square metres.
    pub total_vacant_area_m2: f64,
    /// Sum of asking rent not being collected per month.
    pub monthly_rent_lost: f64,
    /// Mean whole months vacant, one decimal. `None` without properties.
    pub average_months_vacant: Option<f64>,
    /// Properties with very-high or high potential.
    pub high_potential: u64,
    /// Properties with medium potential.
    pub medium_potential: u64,
}

/// Publication totals for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    /// The channel.
    pub channel: Channel,
    /// Number of publications.
    pub publications: u64,
    /// Total reach.
    pub reach: u64,
    /// Total engagement.
    pub engagement: u64,
    /// Total clicks.
    pub clicks: u64,
    /// `engagement / reach` as a percentage, two decimals. `None` for zero
    /// reach.
    pub engagement_rate: Option<f64>,
}

/// Forum figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    /// Number of posts.
    pub posts: u64,
    /// Sum of upvotes.
    pub upvotes: u64,
    /// Sum of comment counts.
    pub comments: u64,
    /// Distinct author names.
    pub authors: u64,
}

/// Where an event sits relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum TimeStatus {
    /// Dated today or earlier and featured.
    InProgress,
    /// Dated today.
    Today,
    /// Dated `days` ahead.
    Future {
        /// Days until the event date.
        days: u32,
    },
    /// Dated `days` ago.
    Past {
        /// Days since the event date.
        days: u32,
    },
}

impl TimeStatus {
    /// Human-readable relative-time label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::InProgress => "In progress".to_string(),
            Self::Today => "Today".to_string(),
            Self::Future { days: 1 } => "Tomorrow".to_string(),
            Self::Future { days } => format!("In {days} days"),
            Self::Past { days: 1 } => "Yesterday".to_string(),
            Self::Past { days } => format!("{days} days ago"),
        }
    }
}

/// Predicted risk for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRisk {
    /// The zone.
    pub zone: ZoneId,
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Events active in the zone at the reference instant.
    pub active_events: u64,
    /// Reported or in-progress alerts in the zone.
    pub open_alerts: u64,
    /// Historical critical windows.
    pub critical_windows: Vec<TimeWindow>,
    /// Whether the reference time falls in a critical window.
    pub in_critical_window: bool,
    /// Historical event/incident correlation.
    pub correlation: f64,
}

/// Area a recommendation addresses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecommendationCategory {
    /// Policing and patrols.
    Security,
    /// Vacant units and underused zones.
    Occupancy,
    /// Event logistics.
    Events,
}

/// Urgency of a recommendation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Priority {
    /// Can wait for the next planning cycle.
    Medium,
    /// Act now.
    High,
}

/// A heuristic recommendation for district managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Area addressed.
    pub category: RecommendationCategory,
    /// Message for display.
    pub message: String,
    /// Urgency.
    pub priority: Priority,
    /// Zone concerned, if any.
    pub zone: Option<ZoneId>,
}

/// Ready-to-post content for every channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    /// Event shared.
    pub event_id: String,
    /// Instagram feed caption.
    pub instagram_caption: String,
    /// Hashtags appended to the caption.
    pub hashtags: Vec<String>,
    /// Instagram story text.
    pub instagram_story: String,
    /// WhatsApp message.
    pub whatsapp_message: String,
    /// `wa.me` share URL.
    pub whatsapp_url: String,
    /// Telegram message.
    pub telegram_message: String,
    /// `t.me` share URL.
    pub telegram_url: String,
}

/// A route planning request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteRequest {
    /// Starting point label.
    pub start: Option<String>,
    /// Interest labels (e.g. `coffee`, `art`), in the order chosen.
    pub interests: Vec<String>,
    /// Free-text description of the desired route.
    pub description: Option<String>,
    /// Time available in minutes.
    pub minutes_available: u32,
}

/// Role of a stop in a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StopKind {
    /// Starting point.
    Start,
    /// Intermediate stop.
    Stop,
    /// Return to start.
    End,
}

/// One stop of a planned route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    /// Stop label.
    pub name: String,
    /// Zone of the stop.
    pub zone: ZoneId,
    /// Minutes from departure.
    pub minute: u32,
    /// Role of the stop.
    pub kind: StopKind,
}

/// Liveliness of a zone right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Liveliness {
    /// Plenty going on.
    Lively,
    /// Some movement.
    Moderate,
    /// Empty.
    Quiet,
}

/// Estimated foot traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MovementLevel {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
}

/// Security presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SecurityPresence {
    /// Nobody on duty.
    Absent,
    /// Regular patrol.
    Present,
    /// Extra patrol after several alerts.
    Reinforced,
}

/// Street lighting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LightingLevel {
    /// Normal lighting.
    Adequate,
    /// Extra lighting for nighttime events.
    Reinforced,
}

/// What is happening in a zone (or the whole district) right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSnapshot {
    /// Zone described, `None` for the whole district.
    pub zone: Option<ZoneId>,
    /// Reference time of day.
    pub at: ClockTime,
    /// Overall liveliness.
    pub status: Liveliness,
    /// Events active now.
    pub active_events: u64,
    /// Businesses open now.
    pub open_businesses: u64,
    /// Unresolved alerts in the recent window.
    pub recent_alerts: u64,
    /// Foot traffic estimate.
    pub movement: MovementLevel,
    /// Estimated people present.
    pub estimated_people: u64,
    /// Security presence.
    pub security: SecurityPresence,
    /// Lighting state.
    pub lighting: LightingLevel,
    /// Urban-life score in `[0, 1]`, two decimals.
    pub urban_life_score: f64,
    /// Message for display.
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_status_labels() {
        assert_eq!(TimeStatus::InProgress.label(), "In progress");
        assert_eq!(TimeStatus::Today.label(), "Today");
        assert_eq!(TimeStatus::Future { days: 1 }.label(), "Tomorrow");
        assert_eq!(TimeStatus::Future { days: 4 }.label(), "In 4 days");
        assert_eq!(TimeStatus::Past { days: 1 }.label(), "Yesterday");
        assert_eq!(TimeStatus::Past { days: 10 }.label(), "10 days ago");
    }

    #[test]
    fn undefined_rate_serializes_as_null() {
        let summary = OccupancySummary {
            active: 0,
            vacant: 0,
            rate: None,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert!(json["rate"].is_null());
    }
}
