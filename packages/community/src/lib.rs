#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Visitor-side community state for SCS Conecta.
//!
//! Comments, forum votes and the display theme are kept in a
//! [`KeyValueStore`]. [`MemoryStore`] is volatile; [`JsonFileStore`] keeps a
//! single JSON document on disk. The district engine never reads this state.

pub mod comments;
pub mod store;
pub mod theme;
pub mod votes;

use std::path::PathBuf;

use thiserror::Error;

pub use comments::{Comment, CommentBook};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use theme::{Theme, ThemeState};
pub use votes::{Vote, VoteBook};

/// Errors from reading or writing community state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("State file {}: {source}", path.display())]
    Io {
        /// File or directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value is not valid JSON for its type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
