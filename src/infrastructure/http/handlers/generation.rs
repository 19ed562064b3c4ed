//! Generation HTTP Handlers
//!
//! 客户端断开时 axum 丢弃处理 future，进行中的模型请求随之中止

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::count_words;
use crate::infrastructure::http::dto::{
    ApiResponse, ChapterResponse, EditChapterRequest, EditResponse, GenerateChapterRequest,
    GenerateOutlineRequest, OutlineResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成小说大纲
pub async fn generate_outline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateOutlineRequest>,
) -> Result<Json<ApiResponse<OutlineResponse>>, ApiError> {
    let command = req.into_command(&state.default_model);
    let model = command.model.clone();

    let outline = state.generate_outline_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(OutlineResponse {
        model,
        total_chapters: outline.total_chapters(),
        outline,
    })))
}

/// 生成章节内容
pub async fn generate_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let command = req.into_command(&state.default_model);
    let model = command.model.clone();

    let content = state.generate_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ChapterResponse {
        model,
        word_count: count_words(&content),
        content,
    })))
}

/// 编辑润色章节
pub async fn edit_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EditChapterRequest>,
) -> Result<Json<ApiResponse<EditResponse>>, ApiError> {
    let command = req.into_command(&state.default_model);
    let model = command.model.clone();

    let edited_content = state.edit_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(EditResponse {
        model,
        word_count: count_words(&edited_content),
        edited_content,
    })))
}
