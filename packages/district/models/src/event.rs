//! Scheduled district events.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{ClockTime, Tagged, ZoneId, Zoned};

/// Kind of event.
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
pub enum EventCategory {
    /// Art, music and cultural programming.
    Cultural,
    /// Promotions organised by local shops and bars.
    #[serde(alias = "comercial")]
    #[strum(to_string = "commercial", serialize = "comercial")]
    Commercial,
    /// Food festivals and tastings.
    #[serde(alias = "gastronomico")]
    #[strum(to_string = "gastronomic", serialize = "gastronomico")]
    Gastronomic,
    /// Concerts and live performances.
    Show,
    /// Street fairs and markets.
    #[serde(alias = "feira")]
    #[strum(to_string = "fair", serialize = "feira")]
    Fair,
}

/// Editorial prominence of an event. Independent of when it happens.
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
pub enum HighlightLevel {
    /// Regular listing.
    #[serde(alias = "baixo")]
    #[strum(to_string = "low", serialize = "baixo")]
    Low,
    /// Promoted listing.
    #[serde(alias = "medio")]
    #[strum(to_string = "medium", serialize = "medio")]
    Medium,
    /// Featured listing.
    #[serde(alias = "alto")]
    #[strum(to_string = "high", serialize = "alto")]
    High,
}

/// Engagement counters collected for an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// Listing views.
    #[serde(default)]
    pub views: u64,
    /// QR code scans.
    #[serde(default)]
    pub qr_scans: u64,
    /// Attendance confirmations.
    #[serde(default)]
    pub confirmations: u64,
}

/// A scheduled event in a district zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event id (e.g. `evt-001`).
    pub id: String,
    /// Event title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Zone hosting the event.
    pub zone: ZoneId,
    /// Calendar date the event starts on.
    pub date: NaiveDate,
    /// Start time.
    pub start_time: ClockTime,
    /// End time. Earlier than `start_time` when the event runs past midnight.
    pub end_time: ClockTime,
    /// Event kind.
    pub category: EventCategory,
    /// Target audience tags (e.g. `women`, `elderly`, `accessible`).
    #[serde(default)]
    pub audience: BTreeSet<String>,
    /// Support the organiser requested (e.g. `security`, `lighting`).
    #[serde(default)]
    pub support_needs: BTreeSet<String>,
    /// Editorial highlight level.
    pub highlight: HighlightLevel,
    /// Engagement counters.
    #[serde(default)]
    pub engagement: Engagement,
    /// Public event page, used for QR codes and sharing.
    #[serde(default)]
    pub link: Option<String>,
}

impl Event {
    /// Hour (0-23) the event starts at.
    #[must_use]
    pub const fn start_hour(&self) -> u8 {
        self.start_time.hour()
    }
}

impl Zoned for Event {
    fn zone(&self) -> Option<&ZoneId> {
        Some(&self.zone)
    }
}

impl Tagged for Event {
    fn tags(&self) -> &BTreeSet<String> {
        &self.audience
    }
}
