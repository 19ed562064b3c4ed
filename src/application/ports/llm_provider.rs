//! LLM Provider Port - 大模型服务抽象
//!
//! 定义统一的 "send(prompt, temperature, max_tokens) → text" 能力，
//! 具体的请求/响应格式在 infrastructure/adapters 层实现

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// 已支持的模型服务（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// chat-completion 风格
    OpenAi,
    /// messages 风格
    Anthropic,
    /// 自定义端点
    Custom,
}

impl ProviderId {
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Anthropic, ProviderId::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Custom => "Custom",
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 模型服务错误
///
/// 详情只用于内部日志，不直接暴露给终端用户
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 补全请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// LLM Provider Port
///
/// 每个实现对应一个模型服务
#[async_trait]
pub trait LlmProviderPort: Send + Sync {
    /// 服务标识
    fn id(&self) -> ProviderId;

    /// 展示名称
    fn display_name(&self) -> &str {
        self.id().display_name()
    }

    /// 发送提示词，返回模型的原始文本回复
    async fn send(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
