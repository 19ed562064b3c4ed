//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping          GET   健康检查
//! - /api/ai/models     GET   支持的模型服务
//! - /api/ai/outline    POST  生成小说大纲
//! - /api/ai/chapter    POST  生成章节内容
//! - /api/ai/edit       POST  编辑润色章节

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::error::ApiError;
use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .fallback(not_found)
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/ai", ai_routes())
}

/// AI 路由
fn ai_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/models", get(handlers::list_models))
        .route("/outline", post(handlers::generate_outline))
        .route("/chapter", post(handlers::generate_chapter))
        .route("/edit", post(handlers::edit_chapter))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("接口不存在".to_string())
}
