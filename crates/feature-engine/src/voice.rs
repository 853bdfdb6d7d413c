//! Voice feature averaging and characteristics derivation

use mood_types::VoiceFeatureSummary;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One raw voice reading from the client-side extractor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VoiceSample {
    /// Fundamental pitch (Hz)
    pub pitch: f64,
    /// Amplitude (arbitrary unit)
    pub volume: f64,
    /// Spectral energy (arbitrary unit)
    pub energy: f64,
}

/// Pitch band boundaries (Hz). Typical speech sits between these.
const PITCH_LOW_HZ: f64 = 130.0;
const PITCH_HIGH_HZ: f64 = 220.0;

/// Volume band boundaries (normalized amplitude).
const VOLUME_SOFT: f64 = 0.25;
const VOLUME_LOUD: f64 = 0.6;

/// Energy threshold separating flat from lively delivery.
const ENERGY_LIVELY: f64 = 0.5;

/// Average a sampling window of raw readings into a feature summary.
///
/// An empty window yields a zeroed summary so a failed capture never
/// poisons downstream classification.
pub fn summarize_voice(samples: &[VoiceSample]) -> VoiceFeatureSummary {
    if samples.is_empty() {
        return VoiceFeatureSummary {
            characteristics: "no voice signal".to_string(),
            ..Default::default()
        };
    }

    let n = samples.len() as f64;
    let pitch = samples.iter().map(|s| s.pitch).sum::<f64>() / n;
    let volume = samples.iter().map(|s| s.volume).sum::<f64>() / n;
    let energy = samples.iter().map(|s| s.energy).sum::<f64>() / n;

    let characteristics = describe(pitch, volume, energy);
    debug!(samples = samples.len(), pitch, volume, energy, "summarized voice window");

    VoiceFeatureSummary {
        pitch,
        volume,
        energy,
        characteristics,
    }
}

/// Build the human-readable characteristics string from averaged features.
fn describe(pitch: f64, volume: f64, energy: f64) -> String {
    let pitch_desc = if pitch > PITCH_HIGH_HZ {
        "high-pitched"
    } else if pitch < PITCH_LOW_HZ {
        "low-pitched"
    } else {
        "mid-pitched"
    };

    let volume_desc = if volume > VOLUME_LOUD {
        "loud"
    } else if volume < VOLUME_SOFT {
        "soft"
    } else {
        "moderate volume"
    };

    let energy_desc = if energy > ENERGY_LIVELY {
        "lively"
    } else {
        "flat"
    };

    format!("{pitch_desc}, {volume_desc}, {energy_desc} delivery")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let samples = vec![
            VoiceSample {
                pitch: 180.0,
                volume: 0.4,
                energy: 0.6,
            },
            VoiceSample {
                pitch: 220.0,
                volume: 0.6,
                energy: 0.8,
            },
        ];
        let summary = summarize_voice(&samples);
        assert!((summary.pitch - 200.0).abs() < 1e-9);
        assert!((summary.volume - 0.5).abs() < 1e-9);
        assert!((summary.energy - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_empty_window() {
        let summary = summarize_voice(&[]);
        assert_eq!(summary.pitch, 0.0);
        assert_eq!(summary.characteristics, "no voice signal");
    }

    #[test]
    fn test_characteristics_bands() {
        let summary = summarize_voice(&[VoiceSample {
            pitch: 260.0,
            volume: 0.8,
            energy: 0.9,
        }]);
        assert_eq!(summary.characteristics, "high-pitched, loud, lively delivery");

        let summary = summarize_voice(&[VoiceSample {
            pitch: 100.0,
            volume: 0.1,
            energy: 0.2,
        }]);
        assert_eq!(summary.characteristics, "low-pitched, soft, flat delivery");
    }
}
