//! Guardian profile routes

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use mood_types::GuardianProfile;
use storage::GuardianProfileStore;

use crate::error::ApiError;
use crate::routes::analyze::caller_id;
use crate::AppState;

/// Body for `PUT /api/v1/guardian`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuardianRequest {
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relationship: Option<String>,
}

/// Response shared by both guardian routes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianResponse {
    pub profile: Option<GuardianProfile>,
    pub alerts_enabled: bool,
}

/// Get the caller's guardian profile.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<GuardianResponse>, ApiError> {
    let user_id = caller_id(&headers).ok_or(ApiError::MissingUser)?;
    let profile = state.store.get(&user_id)?;
    let alerts_enabled = profile.as_ref().map(|p| p.alerts_enabled()).unwrap_or(false);

    Ok(Json(GuardianResponse {
        profile,
        alerts_enabled,
    }))
}

/// Create or replace the caller's guardian profile.
///
/// Setup counts as complete once a non-empty phone number is stored.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<UpdateGuardianRequest>,
) -> Result<Json<GuardianResponse>, ApiError> {
    let user_id = caller_id(&headers).ok_or(ApiError::MissingUser)?;

    let has_phone = req
        .guardian_phone
        .as_deref()
        .map(|p| !p.trim().is_empty())
        .unwrap_or(false);

    let profile = GuardianProfile {
        guardian_name: req.guardian_name,
        guardian_phone: req.guardian_phone,
        guardian_relationship: req.guardian_relationship,
        has_completed_guardian_setup: has_phone,
    };

    state.store.upsert(&user_id, profile.clone())?;
    info!(user_id, setup_complete = has_phone, "guardian profile updated");

    Ok(Json(GuardianResponse {
        alerts_enabled: profile.alerts_enabled(),
        profile: Some(profile),
    }))
}
