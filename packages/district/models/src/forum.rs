//! Community forum posts.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{Tagged, ZoneId, Zoned};

/// Forum section a post belongs to.
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
pub enum PostCategory {
    #[serde(alias = "aviso")]
    #[strum(to_string = "notice", serialize = "aviso")]
    Notice,
    #[serde(alias = "evento")]
    #[strum(to_string = "event", serialize = "evento")]
    Event,
    #[serde(alias = "comercio")]
    #[strum(to_string = "commerce", serialize = "comercio")]
    Commerce,
    #[serde(alias = "seguranca")]
    #[strum(to_string = "safety", serialize = "seguranca")]
    Safety,
    #[serde(alias = "sugestao")]
    #[strum(to_string = "suggestion", serialize = "sugestao")]
    Suggestion,
    #[serde(alias = "discussao")]
    #[strum(to_string = "discussion", serialize = "discussao")]
    Discussion,
}

/// Who wrote a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Whether the account is verified.
    #[serde(default)]
    pub verified: bool,
    /// Free-form role (e.g. `official`, `merchant`, `citizen`).
    #[serde(default)]
    pub role: String,
}

/// A forum post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique id (e.g. `post-001`).
    pub id: String,
    /// Title.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Author.
    pub author: Author,
    /// Section.
    pub category: PostCategory,
    /// Zone the post is about, `None` for district-wide posts.
    #[serde(default)]
    pub zone: Option<ZoneId>,
    /// Pinned to the top of the forum.
    #[serde(default)]
    pub pinned: bool,
    /// Upvote count.
    #[serde(default)]
    pub upvotes: u32,
    /// Downvote count.
    #[serde(default)]
    pub downvotes: u32,
    /// Comment count.
    #[serde(default)]
    pub comment_count: u32,
    /// Publication time.
    pub timestamp: NaiveDateTime,
    /// Tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Post {
    /// Net score (`upvotes - downvotes`).
    #[must_use]
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

impl Zoned for Post {
    fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }
}

impl Tagged for Post {
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}
