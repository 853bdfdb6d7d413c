//! In-memory repository implementation

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use mood_types::{GuardianProfile, MoodHistoryEntry};
use tracing::{debug, info};

use crate::{GuardianProfileStore, MoodHistoryStore, StorageError};

/// In-memory store backing both collaborator interfaces.
///
/// History is kept per user in insertion order with a retention cap.
/// Durable persistence is not required; any KV backend could replace this
/// behind the same traits.
pub struct InMemoryStore {
    history: Mutex<HashMap<String, VecDeque<MoodHistoryEntry>>>,
    profiles: Mutex<HashMap<String, GuardianProfile>>,
    /// Max history entries retained per user
    max_entries_per_user: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        info!("Creating in-memory mood store");
        Self {
            history: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            max_entries_per_user: 10_000,
        }
    }

    #[cfg(test)]
    fn with_capacity(max_entries_per_user: usize) -> Self {
        Self {
            max_entries_per_user,
            ..Self::new()
        }
    }

    /// Total history entries across all users.
    pub fn history_count(&self) -> usize {
        self.history
            .lock()
            .map(|h| h.values().map(|v| v.len()).sum())
            .unwrap_or(0)
    }

    /// Number of users with a guardian profile.
    pub fn profile_count(&self) -> usize {
        self.profiles.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodHistoryStore for InMemoryStore {
    fn append(&self, entry: MoodHistoryEntry) -> Result<(), StorageError> {
        let mut history = self
            .history
            .lock()
            .map_err(|e| StorageError::Store(format!("lock error: {e}")))?;

        let log = history.entry(entry.user_id.clone()).or_default();
        while log.len() >= self.max_entries_per_user {
            log.pop_front();
        }
        debug!(user_id = %entry.user_id, mood = %entry.mood, "appending history entry");
        log.push_back(entry);
        Ok(())
    }

    fn query_recent(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MoodHistoryEntry>, StorageError> {
        let history = self
            .history
            .lock()
            .map_err(|e| StorageError::Store(format!("lock error: {e}")))?;

        Ok(history
            .get(user_id)
            .map(|log| log.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

impl GuardianProfileStore for InMemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<GuardianProfile>, StorageError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Store(format!("lock error: {e}")))?;
        Ok(profiles.get(user_id).cloned())
    }

    fn upsert(&self, user_id: &str, profile: GuardianProfile) -> Result<(), StorageError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Store(format!("lock error: {e}")))?;
        profiles.insert(user_id.to_string(), profile);
        Ok(())
    }
}
