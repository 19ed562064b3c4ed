//! Ping Handler
//!
//! 健康检查

use axum::Json;
use serde::Serialize;

use crate::infrastructure::http::dto::ApiResponse;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Json<ApiResponse<PingResponse>> {
    Json(ApiResponse::success(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
