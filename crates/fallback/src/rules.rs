//! Lexicon rules for transcript classification

use async_trait::async_trait;
use mood_types::{MoodClassification, MoodLabel, VoiceFeatureSummary};
use tracing::debug;

use crate::{ClassifierError, TextMoodClassifier};

/// Keyword lexicon per mood label, matched case-insensitively against the
/// transcript. Order matters for tie-breaking: earlier rows win equal hit
/// counts.
const LEXICON: &[(MoodLabel, &[&str])] = &[
    (MoodLabel::Happy, &["happy", "glad", "great", "wonderful", "smile", "joy"]),
    (MoodLabel::Sad, &["sad", "down", "cry", "crying", "miserable", "unhappy"]),
    (MoodLabel::Angry, &["angry", "furious", "mad", "annoyed", "hate"]),
    (MoodLabel::Anxious, &["anxious", "worried", "nervous", "scared", "afraid"]),
    (MoodLabel::Stressed, &["stressed", "pressure", "deadline", "too much"]),
    (MoodLabel::Excited, &["excited", "thrilled", "can't wait", "amazing"]),
    (MoodLabel::Lonely, &["lonely", "alone", "isolated", "nobody"]),
    (MoodLabel::Overwhelmed, &["overwhelmed", "drowning", "swamped"]),
    (MoodLabel::Melancholic, &["melancholy", "nostalgic", "wistful", "empty"]),
    (MoodLabel::Confused, &["confused", "lost", "unsure", "don't know"]),
    (MoodLabel::Hopeful, &["hope", "hopeful", "looking forward", "better"]),
    (MoodLabel::Confident, &["confident", "ready", "strong", "capable"]),
    (MoodLabel::Peaceful, &["peaceful", "quiet", "serene", "relaxed"]),
    (MoodLabel::Calm, &["calm", "fine", "okay", "steady"]),
];

/// Voice energy above which a neutral transcript reads as energetic.
const ENERGETIC_VOICE_ENERGY: f64 = 0.7;

/// Deterministic lexicon classifier.
///
/// Confidence scales with keyword hits inside [40, 75]: deliberately
/// humbler than the LLM collaborator it stands in for.
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextMoodClassifier for RuleBasedClassifier {
    async fn classify(
        &self,
        transcript: &str,
        voice: &VoiceFeatureSummary,
    ) -> Result<MoodClassification, ClassifierError> {
        let text = transcript.to_lowercase();

        let mut best: Option<(MoodLabel, usize)> = None;
        for (mood, keywords) in LEXICON {
            let hits = keywords.iter().filter(|k| text.contains(*k)).count();
            if hits > 0 && best.map(|(_, h)| hits > h).unwrap_or(true) {
                best = Some((*mood, hits));
            }
        }

        let (mood, confidence, reasoning) = match best {
            Some((mood, hits)) => {
                let confidence = (40.0 + hits as f64 * 15.0).min(75.0);
                (
                    mood,
                    confidence,
                    format!("Transcript keywords suggested {mood} ({hits} matches)"),
                )
            }
            None if voice.energy > ENERGETIC_VOICE_ENERGY => (
                MoodLabel::Energetic,
                45.0,
                format!("No mood keywords; lively voice ({})", voice.characteristics),
            ),
            None => (
                MoodLabel::Calm,
                40.0,
                "No mood keywords in transcript; defaulting to calm".to_string(),
            ),
        };

        debug!(%mood, confidence, "rule-based classification");
        Ok(MoodClassification::new(mood, confidence, reasoning))
    }
}
