//! Shared Data Contracts
//!
//! Types exchanged between the analysis pipeline stages:
//! - Mood vocabulary and classification results
//! - Facial expression and voice feature summaries
//! - Mood history records and guardian profiles

pub mod history;
pub mod mood;
pub mod signals;

pub use history::{DetectionSource, GuardianProfile, MoodHistoryEntry};
pub use mood::{MoodClassification, MoodLabel};
pub use signals::{FacialExpressionSample, VoiceFeatureSummary};
