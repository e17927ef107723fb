//! Banner and health probe.
//!
//! Both keep the plain JSON shape the dashboard front-end already polls,
//! without the `ApiResponse` wrapper.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
    pub ai_models: &'static str,
}

pub async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "AI Traffic Violation Detection API",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// There is no database and no detection model; the probe says so.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        database: "not_configured",
        ai_models: "simulated",
    })
}
