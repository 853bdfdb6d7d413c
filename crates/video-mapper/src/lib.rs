//! Video Emotion Mapper
//!
//! Maps a 7-channel facial expression distribution onto the 16-way mood
//! vocabulary via hand-tuned weighted linear combinations, then picks the
//! top-scoring mood. Pure and synchronous; safe to call per request.

use mood_types::{FacialExpressionSample, MoodClassification, MoodLabel};
use tracing::debug;

/// Facial-only detection is never reported below this confidence.
pub const MIN_CONFIDENCE: f64 = 55.0;

/// Facial-only detection is never reported above this confidence.
pub const MAX_CONFIDENCE: f64 = 92.0;

/// Candidate moods in scoring order. Ties are broken by this order: the
/// earlier entry wins. With the weight table below an all-neutral sample
/// scores `calm` and `peaceful` identically, so `calm` is the fixed result.
const SCORE_ORDER: [MoodLabel; 16] = [
    MoodLabel::Happy,
    MoodLabel::Blissful,
    MoodLabel::Excited,
    MoodLabel::Calm,
    MoodLabel::Peaceful,
    MoodLabel::Sad,
    MoodLabel::Melancholic,
    MoodLabel::Lonely,
    MoodLabel::Anxious,
    MoodLabel::Stressed,
    MoodLabel::Overwhelmed,
    MoodLabel::Angry,
    MoodLabel::Confused,
    MoodLabel::Energetic,
    MoodLabel::Confident,
    MoodLabel::Hopeful,
];

/// Weighted score of one candidate mood for a sample.
///
/// Each row is a hand-tuned linear combination of the seven channels with
/// weights summing to at most 1. Some rows deliberately sum to less than 1
/// to leave confidence headroom for moods the face alone signals weakly.
/// The `calm` and `peaceful` rows mix in complement terms so a blank face
/// still scores as restful rather than as nothing at all.
fn score(mood: MoodLabel, s: &FacialExpressionSample) -> f64 {
    match mood {
        MoodLabel::Happy => 0.8 * s.happy + 0.2 * s.surprised,
        MoodLabel::Blissful => 0.6 * s.happy + 0.3 * s.neutral + 0.1 * s.surprised,
        MoodLabel::Excited => 0.5 * s.happy + 0.5 * s.surprised,
        MoodLabel::Calm => 0.7 * s.neutral + 0.3 * (1.0 - s.happy - s.sad - s.angry),
        MoodLabel::Peaceful => 0.8 * s.neutral + 0.2 * (1.0 - s.fearful - s.angry),
        MoodLabel::Sad => 0.8 * s.sad + 0.1 * s.neutral,
        MoodLabel::Melancholic => 0.6 * s.sad + 0.3 * s.neutral,
        MoodLabel::Lonely => 0.7 * s.sad + 0.2 * s.fearful,
        MoodLabel::Anxious => 0.7 * s.fearful + 0.2 * s.sad,
        MoodLabel::Stressed => 0.5 * s.fearful + 0.3 * s.angry + 0.2 * s.sad,
        MoodLabel::Overwhelmed => 0.6 * s.fearful + 0.2 * s.disgusted + 0.2 * s.sad,
        MoodLabel::Angry => 0.9 * s.angry,
        MoodLabel::Confused => 0.5 * s.disgusted + 0.3 * s.fearful + 0.2 * s.surprised,
        MoodLabel::Energetic => 0.6 * s.happy + 0.3 * s.surprised,
        MoodLabel::Confident => 0.5 * s.happy + 0.3 * s.angry + 0.2 * s.neutral,
        MoodLabel::Hopeful => 0.4 * s.happy + 0.3 * s.neutral + 0.2 * s.surprised,
    }
}

/// Classify a facial expression sample.
///
/// Selection is a strict-greater scan over [`SCORE_ORDER`], so the result
/// is total and deterministic for every input including all-zero samples.
/// Confidence is the top score on a 0-100 scale clamped to
/// [[`MIN_CONFIDENCE`], [`MAX_CONFIDENCE`]].
pub fn map_expressions(sample: &FacialExpressionSample) -> MoodClassification {
    let mut top_mood = SCORE_ORDER[0];
    let mut top = score(top_mood, sample);
    let mut second = f64::MIN;

    for &mood in &SCORE_ORDER[1..] {
        let v = score(mood, sample);
        if v > top {
            second = top;
            top_mood = mood;
            top = v;
        } else if v > second {
            second = v;
        }
    }

    // Margin between the top two candidates. Reported for diagnostics but
    // never changes the selection.
    let margin = top - second.max(0.0);
    debug!(
        mood = %top_mood,
        top_score = top,
        margin,
        "facial expression scored"
    );

    let confidence = (top * 100.0).round().clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    let reasoning = format!(
        "Facial analysis: {:.0}% happy, {:.0}% sad, {:.0}% neutral, {:.0}% fearful. Detected mood: {}",
        sample.happy * 100.0,
        sample.sad * 100.0,
        sample.neutral * 100.0,
        sample.fearful * 100.0,
        top_mood
    );

    MoodClassification::new(top_mood, confidence, reasoning)
}
