//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{GenerationError, UNAVAILABLE_MESSAGE};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match &self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg.clone())
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg.clone())
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg.clone())
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = errno::SERVICE_UNAVAILABLE, error = %msg, "Service unavailable");
                ErrorResponse::new(errno::SERVICE_UNAVAILABLE, msg.clone())
            }
        };

        // 业务错误统一以 200 返回，由 errno 区分
        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::UnsupportedProvider(_) => ApiError::BadRequest(e.to_string()),
            GenerationError::InvalidPromptInput(field) => {
                ApiError::BadRequest(format!("请填写所有必填字段: {}", field))
            }
            GenerationError::GenerationUnavailable { .. } => {
                ApiError::ServiceUnavailable(UNAVAILABLE_MESSAGE.to_string())
            }
            // 原始回复只保留在日志中
            GenerationError::OutlineParse(_) => {
                ApiError::Internal("大纲生成失败，请重试".to_string())
            }
            GenerationError::Cancelled => ApiError::ServiceUnavailable(e.to_string()),
        }
    }
}
