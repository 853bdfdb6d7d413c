//! Mood history records and guardian profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::MoodLabel;

/// Which modality produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Voice,
    Video,
    Multimodal,
}

/// One appended record of a completed mood analysis.
///
/// Append-only: entries are never mutated or deleted, only read back by the
/// guardian alert evaluator and the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodHistoryEntry {
    pub user_id: String,
    pub mood: MoodLabel,
    pub confidence: i32,
    pub detection_source: DetectionSource,
    pub created_at: DateTime<Utc>,
}

impl MoodHistoryEntry {
    /// Build an entry stamped with the current time.
    pub fn now(
        user_id: impl Into<String>,
        mood: MoodLabel,
        confidence: f64,
        detection_source: DetectionSource,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            mood,
            confidence: confidence.round().clamp(0.0, 100.0) as i32,
            detection_source,
            created_at: Utc::now(),
        }
    }
}

/// Per-user guardian contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardianProfile {
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relationship: Option<String>,
    pub has_completed_guardian_setup: bool,
}

impl GuardianProfile {
    /// Whether this profile qualifies for alert evaluation: a phone number
    /// is present and setup has been completed.
    pub fn alerts_enabled(&self) -> bool {
        self.has_completed_guardian_setup
            && self
                .guardian_phone
                .as_deref()
                .map(|p| !p.trim().is_empty())
                .unwrap_or(false)
    }
}
