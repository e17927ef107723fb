//! Violation record commands.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use trafficwatch::notify::Acknowledgement;
use trafficwatch::{filter_by_type, ViolationFilter, ViolationRecord};

use super::{data_error, ok, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ViolationQuery {
    #[serde(rename = "type")]
    pub violation_type: Option<String>,
}

/// Legacy list shape: `{violations, total}`.
#[derive(Debug, Serialize)]
pub struct ViolationList {
    pub violations: Vec<ViolationRecord>,
    pub total: usize,
}

/// Lists records, optionally narrowed by `?type=`. The active dashboard
/// filter is not touched.
pub async fn list_violations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViolationQuery>,
) -> Response {
    let filter = match query.violation_type.as_deref() {
        Some(value) => match value.parse::<ViolationFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        },
        None => ViolationFilter::All,
    };

    let dashboard = state.dashboard.read().await;
    let violations: Vec<ViolationRecord> =
        filter_by_type(dashboard.provider().list_violations(), filter)
            .into_iter()
            .cloned()
            .collect();

    Json(ViolationList {
        total: violations.len(),
        violations,
    })
    .into_response()
}

pub async fn get_violation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<ViolationRecord> {
    let dashboard = state.dashboard.read().await;
    match dashboard.provider().get_violation(id) {
        Ok(record) => ok(record.clone()),
        Err(e) => data_error(e),
    }
}

pub async fn send_sms(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Acknowledgement> {
    match state.dashboard.write().await.send_sms(id) {
        Ok(ack) => ok(ack),
        Err(e) => data_error(e),
    }
}

pub async fn download_evidence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Acknowledgement> {
    match state.dashboard.write().await.download_evidence(id) {
        Ok(ack) => ok(ack),
        Err(e) => data_error(e),
    }
}
