//! Emotion Feature Normalizer
//!
//! Pure averaging and summarization of raw per-sample readings into the
//! feature summaries the classifiers consume. No I/O, no shared state.

pub mod facial;
pub mod voice;

pub use facial::average_expressions;
pub use voice::{summarize_voice, VoiceSample};
