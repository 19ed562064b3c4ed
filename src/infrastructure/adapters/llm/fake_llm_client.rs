//! Fake LLM Client - 用于测试的模型客户端
//!
//! 不发起网络请求，始终返回固定文本（或固定错误），并记录最近一次请求

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{CompletionRequest, LlmProviderPort, ProviderError, ProviderId};

#[derive(Debug, Clone)]
enum FakeReply {
    Text(String),
    ServiceError(String),
}

/// Fake LLM Client
pub struct FakeLlmClient {
    id: ProviderId,
    reply: FakeReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl FakeLlmClient {
    /// 始终返回 `reply`
    pub fn new(id: ProviderId, reply: impl Into<String>) -> Self {
        Self::with_reply(id, FakeReply::Text(reply.into()))
    }

    /// 始终返回 HTTP 503 服务错误
    pub fn failing(id: ProviderId, body: impl Into<String>) -> Self {
        Self::with_reply(id, FakeReply::ServiceError(body.into()))
    }

    fn with_reply(id: ProviderId, reply: FakeReply) -> Self {
        Self {
            id,
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// 模拟推理延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已收到的请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次请求
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProviderPort for FakeLlmClient {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        tracing::debug!(
            provider = %self.id,
            prompt_chars = request.prompt.chars().count(),
            "FakeLlmClient: returning canned reply"
        );

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            FakeReply::Text(text) => Ok(text.clone()),
            FakeReply::ServiceError(body) => Err(ProviderError::ServiceError {
                status: 503,
                body: body.clone(),
            }),
        }
    }
}
