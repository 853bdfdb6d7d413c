//! Mood history route

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use mood_types::MoodHistoryEntry;
use storage::MoodHistoryStore;

use crate::error::ApiError;
use crate::routes::analyze::caller_id;
use crate::AppState;

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of records
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Response for the history endpoint
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub data: Vec<MoodHistoryEntry>,
    pub count: usize,
}

/// Get the caller's recent mood history, newest first.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let user_id = caller_id(&headers).ok_or(ApiError::MissingUser)?;
    let limit = params.limit.min(500);

    let data = state.store.query_recent(&user_id, limit)?;

    Ok(Json(HistoryResponse {
        count: data.len(),
        data,
    }))
}
