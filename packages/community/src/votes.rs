//! The visitor's own up/down votes on forum posts.

use std::collections::BTreeMap;

use scs_conecta_district_models::Post;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::StoreError;
use crate::store::{KeyValueStore, get_json, set_json};

const VOTES_KEY: &str = "votes";

/// Direction of a vote.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Vote {
    /// Counts as +1.
    Up,
    /// Counts as -1.
    Down,
}

/// State after applying `vote` on top of `current`: repeating a vote
/// clears it, the opposite vote replaces it.
#[must_use]
pub fn toggled(current: Option<Vote>, vote: Vote) -> Option<Vote> {
    if current == Some(vote) { None } else { Some(vote) }
}

/// Net score of `post` including the visitor's own vote.
#[must_use]
pub fn adjusted_score(post: &Post, vote: Option<Vote>) -> i64 {
    post.net_votes()
        + match vote {
            Some(Vote::Up) => 1,
            Some(Vote::Down) => -1,
            None => 0,
        }
}

/// Votes kept in a [`KeyValueStore`] as one JSON map of post id to vote.
pub struct VoteBook<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> VoteBook<'a, S> {
    /// Wraps `store`.
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<BTreeMap<String, Vote>, StoreError> {
        Ok(get_json(&*self.store, VOTES_KEY)?.unwrap_or_default())
    }

    /// The visitor's vote on `post_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the votes cannot be read.
    pub fn vote(&self, post_id: &str) -> Result<Option<Vote>, StoreError> {
        Ok(self.load()?.get(post_id).copied())
    }

    /// Applies `vote` to `post_id` and returns the resulting vote.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the votes cannot be read or written.
    pub fn toggle(&mut self, post_id: &str, vote: Vote) -> Result<Option<Vote>, StoreError> {
        let mut votes = self.load()?;
        let next = toggled(votes.get(post_id).copied(), vote);
        match next {
            Some(v) => {
                votes.insert(post_id.to_string(), v);
            }
            None => {
                votes.remove(post_id);
            }
        }
        set_json(self.store, VOTES_KEY, &votes)?;
        log::debug!("Vote on {post_id} is now {next:?}");
        Ok(next)
    }

    /// Net score of `post` including the stored vote.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the votes cannot be read.
    pub fn score(&self, post: &Post) -> Result<i64, StoreError> {
        Ok(adjusted_score(post, self.vote(&post.id)?))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use scs_conecta_district_models::{Author, PostCategory};

    use super::*;
    use crate::store::MemoryStore;

    fn post(upvotes: u32, downvotes: u32) -> Post {
        Post {
            id: "post-001".to_string(),
            title: "Street lights out on Quadra 2".to_string(),
            content: String::new(),
            author: Author {
                name: "Ana".to_string(),
                verified: false,
                role: "citizen".to_string(),
            },
            category: PostCategory::Safety,
            zone: None,
            pinned: false,
            upvotes,
            downvotes,
            comment_count: 0,
            timestamp: NaiveDateTime::parse_from_str("2025-12-18T10:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            tags: std::collections::BTreeSet::new(),
        }
    }

    #[test]
    fn same_vote_twice_clears_it() {
        assert_eq!(toggled(None, Vote::Up), Some(Vote::Up));
        assert_eq!(toggled(Some(Vote::Up), Vote::Up), None);
        assert_eq!(toggled(Some(Vote::Up), Vote::Down), Some(Vote::Down));
    }

    #[test]
    fn toggles_persist_in_store() {
        let mut store = MemoryStore::new();
        let mut book = VoteBook::new(&mut store);

        assert_eq!(book.toggle("post-001", Vote::Up).unwrap(), Some(Vote::Up));
        assert_eq!(book.toggle("post-001", Vote::Up).unwrap(), None);
        assert_eq!(book.vote("post-001").unwrap(), None);

        book.toggle("post-001", Vote::Up).unwrap();
        assert_eq!(book.toggle("post-001", Vote::Down).unwrap(), Some(Vote::Down));
        assert_eq!(book.vote("post-001").unwrap(), Some(Vote::Down));
        assert_eq!(book.vote("post-002").unwrap(), None);
    }

    #[test]
    fn score_includes_own_vote() {
        let mut store = MemoryStore::new();
        let mut book = VoteBook::new(&mut store);
        let post = post(10, 3);

        assert_eq!(book.score(&post).unwrap(), 7);
        book.toggle("post-001", Vote::Up).unwrap();
        assert_eq!(book.score(&post).unwrap(), 8);
        book.toggle("post-001", Vote::Down).unwrap();
        assert_eq!(book.score(&post).unwrap(), 6);
    }

    #[test]
    fn vote_parses_case_insensitively() {
        assert_eq!("UP".parse::<Vote>().unwrap(), Vote::Up);
        assert_eq!(Vote::Down.to_string(), "down");
    }
}
