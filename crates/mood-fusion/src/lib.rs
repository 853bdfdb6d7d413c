//! Modality Fusion Engine
//!
//! Combines the text/voice classifier's result with the video emotion
//! mapper's result into a single mood. Facial expression is the dominant
//! signal by design; a confidence-adaptive weight shift, an agreement
//! bonus, and a voice-override cascade refine the blend.
//!
//! Pure function of its four inputs. Callers gate on
//! [`MIN_VIDEO_CONFIDENCE`] before invoking; below that threshold the
//! video signal is discarded and no fusion happens.

use mood_types::{MoodClassification, MoodLabel};
use serde::Serialize;
use tracing::debug;

/// Callers only invoke fusion when the detector-reported video confidence
/// exceeds this threshold.
pub const MIN_VIDEO_CONFIDENCE: f64 = 0.3;

/// Baseline share of the facial signal in the confidence blend.
const BASE_FACIAL_WEIGHT: f64 = 0.70;

/// Bounds the confidence-adaptive facial weight.
const FACIAL_WEIGHT_MIN: f64 = 0.60;
const FACIAL_WEIGHT_MAX: f64 = 0.80;

/// Multiplier applied when both modalities agree on the mood.
const AGREEMENT_BOOST: f64 = 1.2;

/// Ceiling for the boosted confidence.
const BOOSTED_CAP: f64 = 95.0;

/// Result of fusing both modalities.
#[derive(Debug, Clone, Serialize)]
pub struct FusedMood {
    /// Final classification
    pub classification: MoodClassification,
    /// Always true: fusion only runs when video was available
    pub video_detected: bool,
    /// Facial weight used for the confidence blend
    pub facial_weight: f64,
}

/// Fuse a voice-derived and a video-derived classification.
///
/// `voice_confidence` and `video_confidence` are the raw detector
/// confidences on a 0-1 scale; the classification structs carry the 0-100
/// scale confidences.
pub fn fuse(
    voice: &MoodClassification,
    video: &MoodClassification,
    voice_confidence: f64,
    video_confidence: f64,
) -> FusedMood {
    // Shift the baseline facial weight toward whichever detector was more
    // sure of its reading, within fixed bounds.
    let delta = (video_confidence - voice_confidence) * 0.1;
    let facial_weight = (BASE_FACIAL_WEIGHT + delta).clamp(FACIAL_WEIGHT_MIN, FACIAL_WEIGHT_MAX);
    let voice_weight = 1.0 - facial_weight;

    let agree = voice.mood == video.mood;
    let blended = video.confidence * facial_weight + voice.confidence * voice_weight;
    let confidence = if agree {
        (blended * AGREEMENT_BOOST).min(BOOSTED_CAP)
    } else {
        blended
    };

    let mood = select_mood(voice, video, voice_confidence, video_confidence);

    debug!(
        facial_weight,
        voice_mood = %voice.mood,
        video_mood = %video.mood,
        fused_mood = %mood,
        confidence,
        "fused modalities"
    );

    let reasoning = format!(
        "Fused facial ({:.0}%) and voice ({:.0}%) signals. Facial suggested {}, voice suggested {}. Final mood: {}",
        facial_weight * 100.0,
        voice_weight * 100.0,
        video.mood,
        voice.mood,
        mood
    );

    FusedMood {
        classification: MoodClassification::new(mood, confidence, reasoning),
        video_detected: true,
        facial_weight,
    }
}

/// Voice-override cascade, evaluated in order with first match winning.
/// The default branch keeps the video mood: facial expression is the
/// prioritized modality.
fn select_mood(
    voice: &MoodClassification,
    video: &MoodClassification,
    voice_confidence: f64,
    video_confidence: f64,
) -> MoodLabel {
    // a. weak video signal against a strong, self-assured voice read
    if video_confidence < 0.6 && voice_confidence > 0.70 && voice.confidence > 70.0 {
        return voice.mood;
    }

    // b. video classification much less sure than a confident voice one
    if video.confidence / voice.confidence.max(1.0) < 0.7 && voice.confidence > 75.0 {
        return voice.mood;
    }

    // c. very strong disagreeing voice read against a middling video one
    if voice_confidence > 0.85
        && voice.confidence > 85.0
        && voice.mood != video.mood
        && video.confidence < 80.0
    {
        return voice.mood;
    }

    video.mood
}
