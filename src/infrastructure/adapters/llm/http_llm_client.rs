//! HTTP LLM Client - 调用外部大模型 HTTP 服务
//!
//! 实现 LlmProviderPort trait，请求/响应格式按服务区分:
//!
//! OpenAI:    POST {base}/chat/completions
//!            Request:  {"model", "messages": [{"role": "user", "content"}], "temperature", "max_tokens"}
//!            Response: choices[0].message.content
//! Anthropic: POST {base}/messages
//!            Request:  {"model", "max_tokens", "temperature", "messages": [...]}
//!            Response: content[0].text
//! Custom:    POST {url}
//!            Request:  {"prompt", "temperature", "max_tokens"}
//!            Response: result / text / content 中第一个非空字符串

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{CompletionRequest, LlmProviderPort, ProviderError, ProviderId};

/// 错误日志中保留的响应体长度
const ERROR_BODY_MAX_CHARS: usize = 512;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// chat-completion 请求体
#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

/// messages 请求体
#[derive(Debug, Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

/// 自定义端点请求体
#[derive(Debug, Serialize)]
struct CustomBody<'a> {
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

/// 单个模型服务的连接配置
#[derive(Clone)]
pub struct ProviderConfig {
    pub id: ProviderId,
    /// OpenAI/Anthropic 为 API 根路径；Custom 为完整端点 URL
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// 请求中的模型名（Custom 不使用）
    pub model: String,
    /// anthropic-version 请求头
    pub api_version: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            base_url: None,
            api_key: None,
            model: String::new(),
            api_version: None,
            timeout_secs: 60,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP LLM 客户端
pub struct HttpLlmClient {
    client: Client,
    config: ProviderConfig,
}

impl HttpLlmClient {
    /// 创建新的 HTTP LLM 客户端
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn require_api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ProviderError::MissingCredential(format!(
                    "{} API key is not configured",
                    self.config.id.display_name()
                ))
            })
    }

    fn require_base_url(&self) -> Result<&str, ProviderError> {
        self.config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                ProviderError::MissingCredential(format!(
                    "{} endpoint URL is not configured",
                    self.config.id.display_name()
                ))
            })
    }

    /// 请求 URL
    fn endpoint(&self) -> Result<String, ProviderError> {
        let base = self.require_base_url()?;
        Ok(match self.config.id {
            ProviderId::OpenAi => format!("{}/chat/completions", base.trim_end_matches('/')),
            ProviderId::Anthropic => format!("{}/messages", base.trim_end_matches('/')),
            ProviderId::Custom => base.to_string(),
        })
    }

    /// 按服务构建带鉴权头和请求体的请求
    fn build_request(&self, request: &CompletionRequest) -> Result<RequestBuilder, ProviderError> {
        let url = self.endpoint()?;
        let messages = vec![ChatMessage {
            role: "user",
            content: &request.prompt,
        }];

        let builder = match self.config.id {
            ProviderId::OpenAi => {
                let key = self.require_api_key()?;
                self.client.post(url).bearer_auth(key).json(&ChatCompletionBody {
                    model: &self.config.model,
                    messages,
                    temperature: request.temperature,
                    max_tokens: request.max_tokens,
                })
            }
            ProviderId::Anthropic => {
                let key = self.require_api_key()?;
                let version = self.config.api_version.as_deref().unwrap_or("2023-06-01");
                self.client
                    .post(url)
                    .header("x-api-key", key)
                    .header("anthropic-version", version)
                    .json(&MessagesBody {
                        model: &self.config.model,
                        max_tokens: request.max_tokens,
                        temperature: request.temperature,
                        messages,
                    })
            }
            ProviderId::Custom => self.client.post(url).json(&CustomBody {
                prompt: &request.prompt,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            }),
        };

        Ok(builder)
    }
}

/// 从响应体中取出文本
pub(crate) fn extract_reply_text(id: ProviderId, body: &Value) -> Option<String> {
    match id {
        ProviderId::OpenAi => body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string),
        ProviderId::Anthropic => body
            .pointer("/content/0/text")
            .and_then(Value::as_str)
            .map(str::to_string),
        ProviderId::Custom => {
            let fields = ["result", "text", "content"]
                .map(|name| body.get(name).and_then(Value::as_str));
            fields
                .iter()
                .flatten()
                .find(|text| !text.is_empty())
                .or(fields[2].as_ref())
                .map(|text| text.to_string())
        }
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_MAX_CHARS).collect()
}

#[async_trait]
impl LlmProviderPort for HttpLlmClient {
    fn id(&self) -> ProviderId {
        self.config.id
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let http_request = self.build_request(request)?;

        tracing::debug!(
            provider = %self.config.id,
            model = %self.config.model,
            prompt_chars = request.prompt.chars().count(),
            "Sending completion request"
        );

        let response = http_request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else if e.is_connect() {
                ProviderError::NetworkError(format!("Cannot connect to {}: {}", self.config.id, e))
            } else {
                ProviderError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ServiceError {
                status: status.as_u16(),
                body: truncate_body(&error_text),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::InvalidResponse(format!("Failed to decode body: {}", e))
            }
        })?;

        let text = extract_reply_text(self.config.id, &body).ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "No reply text in response: {}",
                truncate_body(&body.to_string())
            ))
        })?;

        tracing::info!(
            provider = %self.config.id,
            reply_chars = text.chars().count(),
            "Completion received"
        );

        Ok(text)
    }
}
