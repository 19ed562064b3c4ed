//! Model HTTP Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::{ListSupportedModels, ModelInfo};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub default_model: String,
    pub models: Vec<ModelInfo>,
}

/// 列出支持的模型服务
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ModelsResponse>> {
    let models = state.list_models_handler.handle(ListSupportedModels);
    Json(ApiResponse::success(ModelsResponse {
        default_model: state.default_model.clone(),
        models,
    }))
}
