//! LLM Adapter - 大模型服务客户端实现

mod fake_llm_client;
mod http_llm_client;

use std::sync::Arc;

pub use fake_llm_client::FakeLlmClient;
pub use http_llm_client::*;

use crate::application::ports::{LlmProviderPort, ProviderError, ProviderId};
use crate::application::ProviderRegistry;
use crate::config::AiConfig;

/// 由配置生成三个内置服务的连接参数（注册顺序: openai, anthropic, custom）
pub fn provider_configs(config: &AiConfig) -> Vec<ProviderConfig> {
    let mut openai = ProviderConfig::new(ProviderId::OpenAi)
        .with_base_url(config.openai.base_url.clone())
        .with_model(config.openai.model.clone())
        .with_timeout(config.timeout_secs);
    openai.api_key = config.openai.api_key.clone();

    let mut anthropic = ProviderConfig::new(ProviderId::Anthropic)
        .with_base_url(config.anthropic.base_url.clone())
        .with_model(config.anthropic.model.clone())
        .with_api_version(config.anthropic.version.clone())
        .with_timeout(config.timeout_secs);
    anthropic.api_key = config.anthropic.api_key.clone();

    let mut custom = ProviderConfig::new(ProviderId::Custom).with_timeout(config.timeout_secs);
    custom.base_url = config.custom.url.clone();

    vec![openai, anthropic, custom]
}

/// 构建注册表
///
/// 三个服务总是注册；缺少密钥或端点时在调用时才报错
pub fn build_registry(config: &AiConfig) -> Result<ProviderRegistry, ProviderError> {
    let mut providers: Vec<Arc<dyn LlmProviderPort>> = Vec::new();
    for provider_config in provider_configs(config) {
        tracing::debug!(config = ?provider_config, "Registering provider");
        providers.push(Arc::new(HttpLlmClient::new(provider_config)?));
    }
    Ok(ProviderRegistry::new(providers))
}
