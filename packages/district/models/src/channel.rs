//! Social-media channels and publication history.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{DayOfWeek, TimeWindow};

/// A communication channel.
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
pub enum Channel {
    Instagram,
    Whatsapp,
    Telegram,
}

impl Channel {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Instagram, Self::Whatsapp, Self::Telegram]
    }
}

/// One post of an event on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Unique id (e.g. `pub-001`).
    pub id: String,
    /// Event that was promoted.
    pub event_id: String,
    /// Channel used.
    pub channel: Channel,
    /// When it went out.
    pub timestamp: NaiveDateTime,
    /// People reached.
    #[serde(default)]
    pub reach: u64,
    /// Reactions, replies and shares.
    #[serde(default)]
    pub engagement: u64,
    /// Link clicks.
    #[serde(default)]
    pub clicks: u64,
}

/// Audience profile of a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetrics {
    /// The channel.
    pub channel: Channel,
    /// Followers or members.
    pub audience: u64,
    /// Typical reach per publication.
    #[serde(default)]
    pub average_reach: Option<u64>,
    /// Best posting window (e.g. `18:00-20:00`).
    #[serde(default)]
    pub best_window: Option<TimeWindow>,
    /// Best posting day.
    #[serde(default)]
    pub best_day: Option<DayOfWeek>,
}
