//! Upload commands for the mock analysis pipeline.

use std::sync::Arc;

use axum::extract::State;
use serde::Deserialize;
use trafficwatch::{CandidateFile, UploadItem};

use super::{ok, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub files: Vec<CandidateFile>,
}

/// Upload items in arrival order.
pub async fn list_uploads(State(state): State<Arc<AppState>>) -> ApiResult<Vec<UploadItem>> {
    ok(state.dashboard.read().await.uploads().to_vec())
}

/// Accepts the admissible descriptors and returns the new items. Files of
/// the wrong type or size are dropped without an error.
pub async fn accept_uploads(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AcceptRequest>,
) -> ApiResult<Vec<UploadItem>> {
    let accepted = state
        .dashboard
        .write()
        .await
        .accept_uploads(&request.files);

    if !accepted.is_empty() {
        state.wake().await;
    }
    ok(accepted)
}
