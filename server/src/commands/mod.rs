//! HTTP commands for the traffic violation dashboard.
//!
//! Commands are organized by domain:
//! - `health`: Banner and health probe
//! - `violations`: Violation records and owner notifications
//! - `dashboard`: Tab, filter and detail selection
//! - `analytics`: Trends, distribution and statistics
//! - `uploads`: Mock upload pipeline

pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod uploads;
pub mod violations;

use std::sync::Arc;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use log::warn;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trafficwatch::DataError;

use crate::state::AppState;

/// Response wrapper for API calls.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Status code plus wrapped payload, as returned by every command.
pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

pub fn fail<T>(status: StatusCode, message: impl Into<String>) -> ApiResult<T> {
    (status, Json(ApiResponse::err(message)))
}

pub fn data_error<T>(e: DataError) -> ApiResult<T> {
    let status = match e {
        DataError::ViolationNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    fail(status, e.to_string())
}

/// JSON body extractor whose rejection is an `ApiResponse` error with 400.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiResult<()>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(fail(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

/// Builds the API router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route("/", get(health::banner))
        .route("/api/health", get(health::health))
        .route("/api/violations", get(violations::list_violations))
        .route("/api/violations/:id", get(violations::get_violation))
        .route("/api/violations/:id/sms", post(violations::send_sms))
        .route(
            "/api/violations/:id/evidence",
            post(violations::download_evidence),
        )
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/dashboard/tab", put(dashboard::set_tab))
        .route("/api/dashboard/filter", put(dashboard::set_filter))
        .route(
            "/api/selection",
            put(dashboard::select_violation).delete(dashboard::clear_selection),
        )
        .route("/api/trends", get(analytics::get_trends))
        .route("/api/distribution", get(analytics::get_distribution))
        .route("/api/stats", get(analytics::get_stats))
        .route(
            "/api/uploads",
            get(uploads::list_uploads).post(uploads::accept_uploads),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
