//! Mood vocabulary and classification results

use serde::{Deserialize, Serialize};

/// Closed 16-way mood vocabulary.
///
/// The variant set is fixed: every classification produced anywhere in the
/// pipeline uses one of these labels, and no stage may extend it at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Calm,
    Energetic,
    Sad,
    Anxious,
    Happy,
    Stressed,
    Peaceful,
    Angry,
    Confused,
    Excited,
    Melancholic,
    Confident,
    Blissful,
    Lonely,
    Hopeful,
    Overwhelmed,
}

impl MoodLabel {
    /// All labels in declaration order.
    pub const ALL: [MoodLabel; 16] = [
        MoodLabel::Calm,
        MoodLabel::Energetic,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Happy,
        MoodLabel::Stressed,
        MoodLabel::Peaceful,
        MoodLabel::Angry,
        MoodLabel::Confused,
        MoodLabel::Excited,
        MoodLabel::Melancholic,
        MoodLabel::Confident,
        MoodLabel::Blissful,
        MoodLabel::Lonely,
        MoodLabel::Hopeful,
        MoodLabel::Overwhelmed,
    ];

    /// Lowercase wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Calm => "calm",
            MoodLabel::Energetic => "energetic",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Happy => "happy",
            MoodLabel::Stressed => "stressed",
            MoodLabel::Peaceful => "peaceful",
            MoodLabel::Angry => "angry",
            MoodLabel::Confused => "confused",
            MoodLabel::Excited => "excited",
            MoodLabel::Melancholic => "melancholic",
            MoodLabel::Confident => "confident",
            MoodLabel::Blissful => "blissful",
            MoodLabel::Lonely => "lonely",
            MoodLabel::Hopeful => "hopeful",
            MoodLabel::Overwhelmed => "overwhelmed",
        }
    }

    /// Parse a lowercase label, returning `None` for anything outside the
    /// vocabulary.
    pub fn parse(s: &str) -> Option<MoodLabel> {
        MoodLabel::ALL.iter().copied().find(|m| m.as_str() == s)
    }

    /// Moods counted as "low" by the guardian alert evaluator.
    pub fn is_low_mood(&self) -> bool {
        matches!(
            self,
            MoodLabel::Sad | MoodLabel::Melancholic | MoodLabel::Lonely | MoodLabel::Overwhelmed
        )
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result shape shared by the text/voice classifier, the video emotion
/// mapper, and the final fused output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodClassification {
    /// Detected mood label
    pub mood: MoodLabel,

    /// Confidence on a 0-100 scale
    pub confidence: f64,

    /// Human-readable breakdown of how the label was chosen
    pub reasoning: String,
}

impl MoodClassification {
    /// Build a classification with confidence clamped to [0, 100].
    pub fn new(mood: MoodLabel, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            mood,
            confidence: confidence.clamp(0.0, 100.0),
            reasoning: reasoning.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_size() {
        assert_eq!(MoodLabel::ALL.len(), 16);
    }

    #[test]
    fn test_wire_roundtrip() {
        for mood in MoodLabel::ALL {
            let json = serde_json::to_string(&mood).unwrap();
            assert_eq!(json, format!("\"{}\"", mood.as_str()));
            assert_eq!(MoodLabel::parse(mood.as_str()), Some(mood));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(MoodLabel::parse("ecstatic"), None);
        assert_eq!(MoodLabel::parse("Happy"), None);
    }

    #[test]
    fn test_low_mood_subset() {
        let low: Vec<_> = MoodLabel::ALL.iter().filter(|m| m.is_low_mood()).collect();
        assert_eq!(low.len(), 4);
        assert!(MoodLabel::Melancholic.is_low_mood());
        assert!(!MoodLabel::Anxious.is_low_mood());
    }

    #[test]
    fn test_confidence_clamped() {
        let c = MoodClassification::new(MoodLabel::Happy, 130.0, "test");
        assert_eq!(c.confidence, 100.0);
        let c = MoodClassification::new(MoodLabel::Happy, -5.0, "test");
        assert_eq!(c.confidence, 0.0);
    }
}
