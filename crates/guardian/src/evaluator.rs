//! Evaluator implementation

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use storage::{GuardianProfileStore, MoodHistoryStore};

use crate::GuardianError;

/// Evaluator configuration
#[derive(Debug, Clone, Serialize)]
pub struct GuardianConfig {
    /// Most recent history entries fetched per evaluation
    pub recent_limit: usize,
    /// Time window over history entries (hours)
    pub window_hours: i64,
    /// Minimum windowed entries before evaluation proceeds
    pub min_entries: usize,
    /// Low-mood fraction above which an alert fires
    pub low_mood_threshold: f64,
    /// Per-user cooldown between alerts (seconds); 0 disables throttling
    /// and every qualifying evaluation re-fires.
    pub cooldown_seconds: u64,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            recent_limit: 100,
            window_hours: 72,
            min_entries: 5,
            low_mood_threshold: 0.6,
            cooldown_seconds: 0,
        }
    }
}

impl GuardianConfig {
    /// Config that alerts at most once per rolling 24 hours per user.
    pub fn with_daily_cooldown() -> Self {
        Self {
            cooldown_seconds: 86_400,
            ..Default::default()
        }
    }
}

/// One alert-trigger event.
#[derive(Debug, Clone, Serialize)]
pub struct GuardianAlert {
    pub id: Uuid,
    pub user_id: String,
    pub guardian_name: Option<String>,
    pub guardian_phone: String,
    pub message: String,
    /// Fraction of windowed entries in the low-mood subset
    pub sad_fraction: f64,
    /// Number of entries inside the evaluation window
    pub window_entries: usize,
}

/// Downstream delivery seam. Real SMS delivery is out of scope; the
/// default implementation just logs the event.
pub trait AlertDispatcher: Send + Sync {
    fn dispatch(&self, alert: &GuardianAlert) -> Result<(), GuardianError>;
}

/// Dispatcher that records the event in the log and nothing else.
pub struct LoggingDispatcher;

impl AlertDispatcher for LoggingDispatcher {
    fn dispatch(&self, alert: &GuardianAlert) -> Result<(), GuardianError> {
        info!(
            alert_id = %alert.id,
            user_id = %alert.user_id,
            phone = %alert.guardian_phone,
            sad_fraction = alert.sad_fraction,
            "guardian alert dispatched: {}",
            alert.message
        );
        Ok(())
    }
}

/// Guardian alert evaluator with injected store collaborators.
pub struct GuardianEvaluator {
    config: GuardianConfig,
    history: Arc<dyn MoodHistoryStore>,
    profiles: Arc<dyn GuardianProfileStore>,
    dispatcher: Arc<dyn AlertDispatcher>,
    /// Last fire time per user, for the optional cooldown
    last_fired: Mutex<HashMap<String, Instant>>,
}

impl GuardianEvaluator {
    pub fn new(
        config: GuardianConfig,
        history: Arc<dyn MoodHistoryStore>,
        profiles: Arc<dyn GuardianProfileStore>,
        dispatcher: Arc<dyn AlertDispatcher>,
    ) -> Self {
        info!("Creating guardian evaluator with config: {:?}", config);
        Self {
            config,
            history,
            profiles,
            dispatcher,
            last_fired: Mutex::new(HashMap::new()),
        }
    }

    /// Evaluate one user and dispatch at most one alert.
    ///
    /// Returns the dispatched alert, or `None` when any gate failed:
    /// missing or incomplete guardian setup, too few windowed entries,
    /// low-mood fraction at or under the threshold, or active cooldown.
    pub fn evaluate(&self, user_id: &str) -> Result<Option<GuardianAlert>, GuardianError> {
        let Some(profile) = self.profiles.get(user_id)? else {
            debug!(user_id, "no guardian profile, skipping evaluation");
            return Ok(None);
        };
        if !profile.alerts_enabled() {
            debug!(user_id, "guardian setup incomplete, skipping evaluation");
            return Ok(None);
        }

        let entries = self.history.query_recent(user_id, self.config.recent_limit)?;
        let cutoff = Utc::now() - chrono::Duration::hours(self.config.window_hours);
        let windowed: Vec<_> = entries.iter().filter(|e| e.created_at > cutoff).collect();

        if windowed.len() < self.config.min_entries {
            debug!(
                user_id,
                windowed = windowed.len(),
                "insufficient history in window, skipping evaluation"
            );
            return Ok(None);
        }

        let low = windowed.iter().filter(|e| e.mood.is_low_mood()).count();
        let sad_fraction = low as f64 / windowed.len() as f64;

        if sad_fraction <= self.config.low_mood_threshold {
            debug!(user_id, sad_fraction, "low-mood fraction under threshold");
            return Ok(None);
        }

        if self.in_cooldown(user_id) {
            warn!(user_id, "guardian alert suppressed: in cooldown period");
            return Ok(None);
        }

        let relationship = profile
            .guardian_relationship
            .clone()
            .unwrap_or_else(|| "friend".to_string());
        let alert = GuardianAlert {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            guardian_name: profile.guardian_name.clone(),
            guardian_phone: profile.guardian_phone.clone().unwrap_or_default(),
            message: format!("Your {relationship} might need a bit of warmth today"),
            sad_fraction,
            window_entries: windowed.len(),
        };

        self.dispatcher.dispatch(&alert)?;
        self.record_fire(user_id);

        Ok(Some(alert))
    }

    fn in_cooldown(&self, user_id: &str) -> bool {
        if self.config.cooldown_seconds == 0 {
            return false;
        }
        let fired = self.last_fired.lock().unwrap_or_else(|e| e.into_inner());
        fired
            .get(user_id)
            .map(|t| t.elapsed() < Duration::from_secs(self.config.cooldown_seconds))
            .unwrap_or(false)
    }

    fn record_fire(&self, user_id: &str) {
        let mut fired = self.last_fired.lock().unwrap_or_else(|e| e.into_inner());
        fired.insert(user_id.to_string(), Instant::now());
    }
}
