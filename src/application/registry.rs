//! Provider Registry - 模型服务注册表
//!
//! 启动时构建一次，之后只读；通过依赖注入传给各个生成处理器。

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::GenerationError;
use crate::application::ports::{LlmProviderPort, ProviderId};

/// 对外展示的模型信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// 模型服务注册表
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn LlmProviderPort>>,
}

impl ProviderRegistry {
    /// 按给定顺序注册；重复的 ID 只保留第一个
    pub fn new(providers: Vec<Arc<dyn LlmProviderPort>>) -> Self {
        let mut unique: Vec<Arc<dyn LlmProviderPort>> = Vec::with_capacity(providers.len());
        for provider in providers {
            if unique.iter().any(|p| p.id() == provider.id()) {
                tracing::warn!(provider = %provider.id(), "Duplicate provider ignored");
                continue;
            }
            unique.push(provider);
        }
        Self { providers: unique }
    }

    /// 按模型 ID 查找服务
    pub fn resolve(&self, model_id: &str) -> Result<Arc<dyn LlmProviderPort>, GenerationError> {
        let id: ProviderId = model_id
            .parse()
            .map_err(|_| GenerationError::unsupported(model_id))?;

        self.providers
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| GenerationError::unsupported(model_id))
    }

    /// 支持的模型列表（注册顺序）
    pub fn supported_models(&self) -> Vec<ModelInfo> {
        self.providers
            .iter()
            .map(|p| ModelInfo {
                id: p.id().as_str().to_string(),
                name: p.display_name().to_string(),
            })
            .collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.id()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FakeLlmClient;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::new(vec![
            Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "a")),
            Arc::new(FakeLlmClient::new(ProviderId::Anthropic, "b")),
            Arc::new(FakeLlmClient::new(ProviderId::Custom, "c")),
        ])
    }

    #[test]
    fn test_supported_models_in_registration_order() {
        let ids: Vec<String> = registry().supported_models().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["openai", "anthropic", "custom"]);
    }

    #[test]
    fn test_resolve_known_model() {
        let provider = registry().resolve("anthropic").unwrap();
        assert_eq!(provider.id(), ProviderId::Anthropic);
    }

    #[test]
    fn test_resolve_unknown_model_fails() {
        let Err(err) = registry().resolve("gemini") else {
            panic!("gemini should not resolve");
        };
        assert!(matches!(err, GenerationError::UnsupportedProvider(ref id) if id == "gemini"));
    }

    #[test]
    fn test_resolve_unregistered_known_id_fails() {
        let registry =
            ProviderRegistry::new(vec![Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "a"))]);
        assert!(registry.resolve("custom").is_err());
        assert!(registry.resolve("openai").is_ok());
    }

    #[test]
    fn test_every_listed_model_resolves() {
        let registry = registry();
        for model in registry.supported_models() {
            assert!(registry.resolve(&model.id).is_ok());
        }
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry = ProviderRegistry::new(vec![
            Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "first")),
            Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "second")),
        ]);
        assert_eq!(registry.supported_models().len(), 1);
    }
}
