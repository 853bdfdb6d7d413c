//! Feature summaries produced by client-side signal extraction

use serde::{Deserialize, Serialize};

/// Facial expression intensity distribution from an external detector.
///
/// Seven non-negative channels, each conventionally in [0, 1]. The
/// distribution is usually close to summing to 1 but is not required to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FacialExpressionSample {
    pub happy: f64,
    pub sad: f64,
    pub angry: f64,
    pub fearful: f64,
    pub disgusted: f64,
    pub surprised: f64,
    pub neutral: f64,
}

impl FacialExpressionSample {
    /// Channels in wire order.
    pub fn channels(&self) -> [f64; 7] {
        [
            self.happy,
            self.sad,
            self.angry,
            self.fearful,
            self.disgusted,
            self.surprised,
            self.neutral,
        ]
    }

    /// Whether every channel is non-negative.
    pub fn is_valid(&self) -> bool {
        self.channels().iter().all(|&v| v >= 0.0 && v.is_finite())
    }
}

/// Aggregate voice features averaged over a sampling window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceFeatureSummary {
    /// Mean fundamental pitch (Hz)
    pub pitch: f64,

    /// Mean amplitude (arbitrary unit)
    pub volume: f64,

    /// Mean spectral energy (arbitrary unit)
    pub energy: f64,

    /// Derived human-readable description of the voice
    pub characteristics: String,
}
