//! Rule-Based Fallback Classifier
//!
//! The text/voice classification normally comes from an LLM collaborator
//! behind [`TextMoodClassifier`]. This crate provides a deterministic
//! lexicon-based implementation used as the default wiring and as the
//! best-effort fallback when the collaborator errors, so the analysis
//! request can always complete.

mod rules;

pub use rules::RuleBasedClassifier;

use async_trait::async_trait;
use mood_types::{MoodClassification, VoiceFeatureSummary};
use thiserror::Error;

/// Classifier errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Empty classifier response")]
    EmptyResponse,
}

/// Seam for the text/voice mood classifier collaborator.
#[async_trait]
pub trait TextMoodClassifier: Send + Sync {
    /// Classify a transcript, with the voice feature summary as context.
    async fn classify(
        &self,
        transcript: &str,
        voice: &VoiceFeatureSummary,
    ) -> Result<MoodClassification, ClassifierError>;
}
