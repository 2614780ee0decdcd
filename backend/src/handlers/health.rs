use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::filters::params::{BRIGHTNESS, CONTRAST, FADE, GRAIN, SATURATE};
use crate::AppState;

/// Filter names accepted by `POST /process`, in the order they are applied.
pub const FILTER_ORDER: [&str; 5] = [BRIGHTNESS, CONTRAST, SATURATE, FADE, GRAIN];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime: f64,
    pub jpeg_quality: u8,
    pub max_upload_bytes: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub api_version: &'static str,
    pub version: &'static str,
    pub filters: [&'static str; 5],
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: state.started_at.elapsed().as_secs_f64(),
        jpeg_quality: state.render.jpeg_quality(),
        max_upload_bytes: state.config.max_upload_bytes,
    })
}

pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        api_version: "v1",
        version: env!("CARGO_PKG_VERSION"),
        filters: FILTER_ORDER,
    })
}
