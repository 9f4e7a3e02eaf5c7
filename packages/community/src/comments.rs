//! Comment threads attached to events, businesses and alerts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::StoreError;
use crate::store::{KeyValueStore, get_json, set_json};

/// Prefix of every comment thread key.
const KEY_PREFIX: &str = "comments";

/// A user comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique id.
    pub id: String,
    /// Comment text, trimmed.
    pub text: String,
    /// Display name of the author.
    pub author: String,
    /// When the comment was posted.
    pub timestamp: NaiveDateTime,
    /// Like count.
    #[serde(default)]
    pub likes: u32,
}

/// Thread identifier for an entity, e.g. `evento-evt-001`.
#[must_use]
pub fn thread_id(kind: &str, entity_id: &str) -> String {
    format!("{kind}-{entity_id}")
}

fn thread_key(kind: &str, entity_id: &str) -> String {
    format!("{KEY_PREFIX}-{}", thread_id(kind, entity_id))
}

/// Comment threads kept in a [`KeyValueStore`], newest comment first.
pub struct CommentBook<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> CommentBook<'a, S> {
    /// Wraps `store`.
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Comments on the entity, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the stored thread cannot be read.
    pub fn comments(&self, kind: &str, entity_id: &str) -> Result<Vec<Comment>, StoreError> {
        Ok(get_json(&*self.store, &thread_key(kind, entity_id))?.unwrap_or_default())
    }

    /// Adds a comment to the entity's thread. Blank text is ignored and
    /// yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the thread cannot be read or written.
    pub fn add(
        &mut self,
        kind: &str,
        entity_id: &str,
        author: &str,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<Option<Comment>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("Ignoring blank comment on {}", thread_id(kind, entity_id));
            return Ok(None);
        }

        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            author: author.to_string(),
            timestamp: now,
            likes: 0,
        };

        let mut thread = self.comments(kind, entity_id)?;
        thread.insert(0, comment.clone());
        set_json(self.store, &thread_key(kind, entity_id), &thread)?;
        log::debug!(
            "Added comment {} to {} ({} total)",
            comment.id,
            thread_id(kind, entity_id),
            thread.len()
        );
        Ok(Some(comment))
    }

    /// Adds one like to a comment. Returns the new like count, or `None`
    /// when the comment is not in the thread.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the thread cannot be read or written.
    pub fn like(
        &mut self,
        kind: &str,
        entity_id: &str,
        comment_id: &str,
    ) -> Result<Option<u32>, StoreError> {
        let mut thread = self.comments(kind, entity_id)?;
        let Some(comment) = thread.iter_mut().find(|c| c.id == comment_id) else {
            return Ok(None);
        };
        comment.likes = comment.likes.saturating_add(1);
        let likes = comment.likes;
        set_json(self.store, &thread_key(kind, entity_id), &thread)?;
        Ok(Some(likes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn thread_ids_join_kind_and_entity() {
        assert_eq!(thread_id("evento", "evt-001"), "evento-evt-001");
    }

    #[test]
    fn newest_comment_first() {
        let mut store = MemoryStore::new();
        let mut book = CommentBook::new(&mut store);
        book.add("evento", "evt-001", "Ana", "First!", at("2025-12-20T19:00:00"))
            .unwrap();
        book.add("evento", "evt-001", "Rui", "  See you there  ", at("2025-12-20T19:05:00"))
            .unwrap();

        let thread = book.comments("evento", "evt-001").unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].text, "See you there");
        assert_eq!(thread[1].author, "Ana");
        assert_ne!(thread[0].id, thread[1].id);
        assert!(book.comments("evento", "evt-002").unwrap().is_empty());
        assert!(store.get("comments-evento-evt-001").unwrap().is_some());
    }

    #[test]
    fn blank_comment_is_ignored() {
        let mut store = MemoryStore::new();
        let mut book = CommentBook::new(&mut store);
        assert_eq!(
            book.add("evento", "evt-001", "Ana", "   ", at("2025-12-20T19:00:00"))
                .unwrap(),
            None
        );
        assert!(store.is_empty());
    }

    #[test]
    fn likes_accumulate() {
        let mut store = MemoryStore::new();
        let mut book = CommentBook::new(&mut store);
        let comment = book
            .add("comercio", "com-001", "Ana", "Great coffee", at("2025-12-20T09:00:00"))
            .unwrap()
            .unwrap();

        assert_eq!(book.like("comercio", "com-001", &comment.id).unwrap(), Some(1));
        assert_eq!(book.like("comercio", "com-001", &comment.id).unwrap(), Some(2));
        assert_eq!(book.like("comercio", "com-001", "nope").unwrap(), None);
    }

    #[test]
    fn comments_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("community.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            CommentBook::new(&mut store)
                .add("evento", "evt-001", "Ana", "Bring water", at("2025-12-20T18:00:00"))
                .unwrap();
        }

        let mut store = JsonFileStore::open(&path).unwrap();
        let thread = CommentBook::new(&mut store)
            .comments("evento", "evt-001")
            .unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].text, "Bring water");
        assert_eq!(thread[0].timestamp, at("2025-12-20T18:00:00"));
    }
}
