//! Mood analysis route
//!
//! The primary pipeline: validate → text/voice classification → optional
//! video fusion → persist history → fire-and-forget guardian evaluation.

use axum::{extract::State, http::HeaderMap, Json};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use fallback::{RuleBasedClassifier, TextMoodClassifier};
use feature_engine::{average_expressions, summarize_voice, VoiceSample};
use mood_types::{
    DetectionSource, FacialExpressionSample, MoodHistoryEntry, MoodLabel, VoiceFeatureSummary,
};
use storage::MoodHistoryStore;

use crate::error::ApiError;
use crate::validate::validate_request;
use crate::AppState;

/// Request body for `POST /api/analyze-mood`.
///
/// Field names are the fixed boundary contract with the client-side
/// feature extractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMoodRequest {
    pub transcript: Option<String>,
    pub voice_features: Option<VoiceFeatureSummary>,
    /// Raw per-sample readings; averaged server-side when no summary is
    /// supplied.
    #[serde(default)]
    pub voice_samples: Vec<VoiceSample>,
    pub voice_confidence: f64,
    pub video_emotions: Option<FacialExpressionSample>,
    /// Raw per-frame readings; averaged server-side when no aggregated
    /// distribution is supplied.
    #[serde(default)]
    pub video_emotion_samples: Vec<FacialExpressionSample>,
    #[serde(default)]
    pub video_confidence: f64,
    pub has_video: bool,
}

/// Response body for `POST /api/analyze-mood`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMoodResponse {
    pub mood: MoodLabel,
    pub confidence: f64,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_detected: Option<bool>,
}

/// Analyze one mood reading.
pub async fn analyze_mood(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeMoodRequest>,
) -> Result<Json<AnalyzeMoodResponse>, ApiError> {
    validate_request(&req)?;
    counter!("mood_analyze_requests_total").increment(1);

    let transcript = req.transcript.as_deref().unwrap_or_default();
    let voice_features = req
        .voice_features
        .clone()
        .unwrap_or_else(|| summarize_voice(&req.voice_samples));

    // The LLM collaborator can fail or return nothing; the request still
    // completes with the rule-based classification instead.
    let voice_result = match state.classifier.classify(transcript, &voice_features).await {
        Ok(result) => result,
        Err(e) => {
            warn!("text classifier failed, using rule-based fallback: {e}");
            counter!("mood_classifier_fallbacks_total").increment(1);
            RuleBasedClassifier::new()
                .classify(transcript, &voice_features)
                .await
                .unwrap_or_else(|_| {
                    mood_types::MoodClassification::new(
                        MoodLabel::Calm,
                        40.0,
                        "Classifier unavailable; defaulted to calm",
                    )
                })
        }
    };

    let video_emotions = req.video_emotions.or_else(|| {
        (!req.video_emotion_samples.is_empty())
            .then(|| average_expressions(&req.video_emotion_samples))
    });

    // Fusion only runs on a usable video signal; a weak or absent one
    // leaves the voice classification untouched.
    let (classification, video_detected, source) = match video_emotions {
        Some(ref emotions)
            if req.has_video && req.video_confidence > mood_fusion::MIN_VIDEO_CONFIDENCE =>
        {
            let video_mood = video_mapper::map_expressions(emotions);
            let fused = mood_fusion::fuse(
                &voice_result,
                &video_mood,
                req.voice_confidence,
                req.video_confidence,
            );
            (fused.classification, Some(true), DetectionSource::Multimodal)
        }
        _ => (voice_result, None, DetectionSource::Voice),
    };

    // Persist and evaluate only for identified callers; anonymous
    // analyses are still answered.
    if let Some(user_id) = caller_id(&headers) {
        state.store.append(MoodHistoryEntry::now(
            &user_id,
            classification.mood,
            classification.confidence,
            source,
        ))?;

        let evaluator = state.evaluator.clone();
        tokio::spawn(async move {
            match evaluator.evaluate(&user_id) {
                Ok(Some(alert)) => {
                    counter!("guardian_alerts_total").increment(1);
                    info!(user_id = %alert.user_id, "guardian alert fired");
                }
                Ok(None) => {}
                // Best-effort side effect: never propagates to the caller.
                Err(e) => warn!("guardian evaluation failed: {e}"),
            }
        });
    }

    Ok(Json(AnalyzeMoodResponse {
        mood: classification.mood,
        confidence: classification.confidence,
        reasoning: classification.reasoning,
        video_detected,
    }))
}

/// Caller identity handed off by the upstream auth collaborator.
pub fn caller_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
