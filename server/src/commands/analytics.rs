//! Analytics commands over the fixture data.

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use trafficwatch::data::{DashboardStats, DistributionSlice, TrendPoint};
use trafficwatch::stats::{self, ViolationSummary};

use super::{ok, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Headline card values.
    pub headline: DashboardStats,
    /// Aggregates computed from the listed records.
    pub summary: ViolationSummary,
}

pub async fn get_trends(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TrendPoint>> {
    ok(state.dashboard.read().await.provider().get_trends().to_vec())
}

pub async fn get_distribution(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<DistributionSlice>> {
    ok(state
        .dashboard
        .read()
        .await
        .provider()
        .get_distribution()
        .to_vec())
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<StatsResponse> {
    let dashboard = state.dashboard.read().await;
    let provider = dashboard.provider();
    ok(StatsResponse {
        headline: provider.get_stats(),
        summary: stats::summarize(provider.list_violations()),
    })
}
