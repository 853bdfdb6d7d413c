//! Request validation for the analyze endpoint

use thiserror::Error;

use crate::routes::analyze::AnalyzeMoodRequest;

/// Validation errors, reported to the caller as 400s before any
/// classification begins.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Field '{field}' out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Missing field '{field}': required when hasVideo is true")]
    MissingField { field: &'static str },

    #[error("Field '{field}' contains a negative or non-finite intensity")]
    InvalidIntensity { field: &'static str },
}

/// Check one value against a closed range.
fn validate_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate an analyze-mood request body.
pub fn validate_request(req: &AnalyzeMoodRequest) -> Result<(), ValidationError> {
    validate_range("voiceConfidence", req.voice_confidence, 0.0, 1.0)?;
    validate_range("videoConfidence", req.video_confidence, 0.0, 1.0)?;

    if req.has_video {
        match (&req.video_emotions, req.video_emotion_samples.as_slice()) {
            (Some(emotions), _) => {
                if !emotions.is_valid() {
                    return Err(ValidationError::InvalidIntensity {
                        field: "videoEmotions",
                    });
                }
            }
            (None, []) => {
                return Err(ValidationError::MissingField {
                    field: "videoEmotions",
                });
            }
            (None, samples) => {
                if samples.iter().any(|s| !s.is_valid()) {
                    return Err(ValidationError::InvalidIntensity {
                        field: "videoEmotionSamples",
                    });
                }
            }
        }
    }

    Ok(())
}
