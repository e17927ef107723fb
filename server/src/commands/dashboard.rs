//! Dashboard navigation commands: tab, gallery filter and detail overlay.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use trafficwatch::{DashboardSnapshot, Tab, ViolationFilter, ViolationRecord};

use super::{data_error, fail, ok, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub filter: ViolationFilter,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub id: u32,
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<DashboardSnapshot> {
    ok(state.dashboard.read().await.snapshot())
}

pub async fn set_tab(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<TabRequest>,
) -> ApiResult<Tab> {
    match request.tab.parse::<Tab>() {
        Ok(tab) => {
            state.dashboard.write().await.set_tab(tab);
            ok(tab)
        }
        Err(e) => fail(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// Sets the gallery filter and returns the records it now shows.
pub async fn set_filter(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<FilterRequest>,
) -> ApiResult<Vec<ViolationRecord>> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.set_filter(request.filter);
    ok(dashboard
        .visible_violations()
        .into_iter()
        .cloned()
        .collect())
}

pub async fn select_violation(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SelectionRequest>,
) -> ApiResult<ViolationRecord> {
    match state.dashboard.write().await.select_by_id(request.id) {
        Ok(record) => ok(record.clone()),
        Err(e) => data_error(e),
    }
}

pub async fn clear_selection(State(state): State<Arc<AppState>>) -> ApiResult<()> {
    state.dashboard.write().await.select_for_detail(None);
    ok(())
}
