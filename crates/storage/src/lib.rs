//! Storage Layer
//!
//! Collaborator interfaces for mood history and guardian profiles, plus the
//! in-memory repository used by the server. Stores are injected into their
//! consumers rather than reached through globals so tests and alternative
//! backends can swap them freely.

mod repository;

pub use repository::InMemoryStore;

use mood_types::{GuardianProfile, MoodHistoryEntry};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store error: {0}")]
    Store(String),
    #[error("Record not found")]
    NotFound,
}

/// Append-only log of completed mood analyses, queried newest-first.
pub trait MoodHistoryStore: Send + Sync {
    /// Append one entry. Entries are never mutated after this.
    fn append(&self, entry: MoodHistoryEntry) -> Result<(), StorageError>;

    /// Up to `limit` most recent entries for a user, newest first.
    fn query_recent(&self, user_id: &str, limit: usize)
        -> Result<Vec<MoodHistoryEntry>, StorageError>;
}

/// Per-user guardian contact details.
pub trait GuardianProfileStore: Send + Sync {
    /// Profile for a user, or `None` if guardian setup never started.
    fn get(&self, user_id: &str) -> Result<Option<GuardianProfile>, StorageError>;

    /// Create or replace a user's profile.
    fn upsert(&self, user_id: &str, profile: GuardianProfile) -> Result<(), StorageError>;
}
