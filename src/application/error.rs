//! 应用层错误定义
//!
//! 生成任务的统一错误类型。所有错误对当前调用都是终止性的，不做内部重试。

use thiserror::Error;

use crate::application::ports::{ProviderError, ProviderId};
use crate::domain::prompts::PromptError;
use crate::domain::OutlineParseError;

/// 面向调用方的统一提示
pub const UNAVAILABLE_MESSAGE: &str = "AI服务暂时不可用，请稍后重试";

/// 生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 请求的模型未注册（在任何网络调用之前失败）
    #[error("不支持的AI模型: {0}")]
    UnsupportedProvider(String),

    /// 必填字段缺失或为空
    #[error("Invalid prompt input: {0}")]
    InvalidPromptInput(String),

    /// 网络错误、非成功响应、缺少凭据或超时
    ///
    /// Display 只输出通用提示，详情保留在 `source` 中供日志使用
    #[error("AI服务暂时不可用，请稍后重试")]
    GenerationUnavailable {
        provider: ProviderId,
        #[source]
        source: ProviderError,
    },

    /// 模型回复无法解析为大纲
    #[error(transparent)]
    OutlineParse(#[from] OutlineParseError),

    /// 调用被取消
    #[error("Generation cancelled")]
    Cancelled,
}

impl GenerationError {
    /// 创建 UnsupportedProvider 错误
    pub fn unsupported(model_id: impl Into<String>) -> Self {
        Self::UnsupportedProvider(model_id.into())
    }

    /// 创建 GenerationUnavailable 错误
    pub fn unavailable(provider: ProviderId, source: ProviderError) -> Self {
        Self::GenerationUnavailable { provider, source }
    }
}

impl From<PromptError> for GenerationError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::InvalidInput(field) => Self::InvalidPromptInput(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_hides_provider_detail() {
        let err = GenerationError::unavailable(
            ProviderId::OpenAi,
            ProviderError::ServiceError {
                status: 401,
                body: "{\"error\":\"invalid api key sk-xxx\"}".to_string(),
            },
        );
        assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_prompt_error_maps_to_invalid_input() {
        let err: GenerationError = PromptError::InvalidInput("theme".to_string()).into();
        assert!(matches!(err, GenerationError::InvalidPromptInput(ref f) if f == "theme"));
    }

    #[test]
    fn test_unsupported_message() {
        assert_eq!(
            GenerationError::unsupported("gemini").to_string(),
            "不支持的AI模型: gemini"
        );
    }
}
