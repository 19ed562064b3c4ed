//! Generation Command Handlers
//!
//! 编排流程：解析模型服务 → 构建提示词 → 调用模型 → 解析回复。
//! 每次调用只发起一次网络请求，不重试，不持有任何共享可变状态。

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::commands::{EditChapter, GenerateChapter, GenerateOutline};
use crate::application::error::GenerationError;
use crate::application::ports::CompletionRequest;
use crate::application::registry::ProviderRegistry;
use crate::domain::outline::OutlineDocument;
use crate::domain::prompts::{
    build_chapter_prompt, build_edit_prompt, build_outline_prompt, ChapterPromptInput,
    EditPromptInput, OutlinePromptInput,
};
use crate::domain::{
    assemble_continuity, extract_chapter_text, parse_outline, preceding_chapters, SamplingParams,
};

/// 各任务的默认采样参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationDefaults {
    pub outline: SamplingParams,
    pub chapter: SamplingParams,
    pub edit: SamplingParams,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            outline: SamplingParams::OUTLINE,
            chapter: SamplingParams::CHAPTER,
            edit: SamplingParams::EDIT,
        }
    }
}

/// 日志中保留的原始回复前缀长度
const RAW_PREVIEW_CHARS: usize = 200;

fn preview(raw: &str) -> String {
    raw.chars().take(RAW_PREVIEW_CHARS).collect()
}

fn checked_sampling(params: SamplingParams) -> Result<SamplingParams, GenerationError> {
    params
        .validate()
        .map_err(GenerationError::InvalidPromptInput)?;
    Ok(params)
}

/// 发送一次补全请求
///
/// 取消令牌触发时立即返回 `Cancelled`，丢弃进行中的请求
async fn dispatch(
    registry: &ProviderRegistry,
    model: &str,
    prompt: impl FnOnce() -> Result<String, GenerationError>,
    params: SamplingParams,
    cancel: &CancellationToken,
) -> Result<String, GenerationError> {
    let provider = registry.resolve(model)?;
    let params = checked_sampling(params)?;
    let prompt = prompt()?;

    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }

    let request = CompletionRequest {
        prompt,
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    };

    tracing::debug!(
        provider = %provider.id(),
        prompt_chars = request.prompt.chars().count(),
        temperature = request.temperature,
        max_tokens = request.max_tokens,
        "Dispatching completion request"
    );

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!(provider = %provider.id(), "Generation cancelled");
            return Err(GenerationError::Cancelled);
        }
        result = provider.send(&request) => result,
    };

    result.map_err(|e| {
        tracing::error!(provider = %provider.id(), error = %e, "Provider call failed");
        GenerationError::unavailable(provider.id(), e)
    })
}

fn generation_span(task: &'static str, model: &str) -> tracing::Span {
    tracing::info_span!(
        "generation",
        generation_id = %Uuid::new_v4(),
        task = task,
        model = %model
    )
}

// ============================================================================
// GenerateOutline
// ============================================================================

/// GenerateOutline Handler
pub struct GenerateOutlineHandler {
    registry: Arc<ProviderRegistry>,
    defaults: SamplingParams,
}

impl GenerateOutlineHandler {
    pub fn new(registry: Arc<ProviderRegistry>, defaults: SamplingParams) -> Self {
        Self { registry, defaults }
    }

    pub async fn handle(&self, command: GenerateOutline) -> Result<OutlineDocument, GenerationError> {
        self.handle_with_cancel(command, CancellationToken::new()).await
    }

    pub async fn handle_with_cancel(
        &self,
        command: GenerateOutline,
        cancel: CancellationToken,
    ) -> Result<OutlineDocument, GenerationError> {
        let span = generation_span("outline", &command.model);
        async move {
            let params = command.sampling.apply(self.defaults);
            let input = OutlinePromptInput {
                theme: command.theme,
                style: command.style,
                length: command.length,
                volume_count: command.volume_count,
            };

            let raw = dispatch(
                &self.registry,
                &command.model,
                || build_outline_prompt(&input).map_err(Into::into),
                params,
                &cancel,
            )
            .await?;

            let outline = parse_outline(&raw).map_err(|e| {
                tracing::warn!(
                    raw_chars = e.raw().chars().count(),
                    raw_preview = %preview(e.raw()),
                    error = %e,
                    "Outline response could not be parsed"
                );
                GenerationError::from(e)
            })?;

            tracing::info!(
                title = %outline.title,
                volumes = outline.volumes.len(),
                chapters = outline.total_chapters(),
                "Outline generated"
            );

            Ok(outline)
        }
        .instrument(span)
        .await
    }
}

// ============================================================================
// GenerateChapter
// ============================================================================

/// GenerateChapter Handler
pub struct GenerateChapterHandler {
    registry: Arc<ProviderRegistry>,
    defaults: SamplingParams,
}

impl GenerateChapterHandler {
    pub fn new(registry: Arc<ProviderRegistry>, defaults: SamplingParams) -> Self {
        Self { registry, defaults }
    }

    pub async fn handle(&self, command: GenerateChapter) -> Result<String, GenerationError> {
        self.handle_with_cancel(command, CancellationToken::new()).await
    }

    pub async fn handle_with_cancel(
        &self,
        command: GenerateChapter,
        cancel: CancellationToken,
    ) -> Result<String, GenerationError> {
        let span = generation_span("chapter", &command.model);
        async move {
            let params = command.sampling.apply(self.defaults);
            let continuity = assemble_continuity(preceding_chapters(
                &command.prior_chapters,
                command.chapter_index,
            ));
            tracing::debug!(
                prior_chapters = command.prior_chapters.len(),
                continuity_entries = continuity.entries().len(),
                "Continuity context assembled"
            );

            let input = ChapterPromptInput {
                novel_title: command.novel_title,
                core_theme: command.core_theme,
                volume_title: command.volume_title,
                volume_summary: command.volume_summary,
                chapter_title: command.chapter_title,
                chapter_summary: command.chapter_summary,
                chapter_index: command.chapter_index,
                total_chapters: command.total_chapters,
                characters: command.characters,
                world_setting: command.world_setting,
                continuity,
                target_words: command.target_words,
            };

            let raw = dispatch(
                &self.registry,
                &command.model,
                || build_chapter_prompt(&input).map_err(Into::into),
                params,
                &cancel,
            )
            .await?;

            let text = extract_chapter_text(&raw);
            tracing::info!(
                chapter = %input.chapter_title,
                chars = text.chars().count(),
                "Chapter generated"
            );
            Ok(text)
        }
        .instrument(span)
        .await
    }
}

// ============================================================================
// EditChapter
// ============================================================================

/// EditChapter Handler
pub struct EditChapterHandler {
    registry: Arc<ProviderRegistry>,
    defaults: SamplingParams,
}

impl EditChapterHandler {
    pub fn new(registry: Arc<ProviderRegistry>, defaults: SamplingParams) -> Self {
        Self { registry, defaults }
    }

    pub async fn handle(&self, command: EditChapter) -> Result<String, GenerationError> {
        self.handle_with_cancel(command, CancellationToken::new()).await
    }

    pub async fn handle_with_cancel(
        &self,
        command: EditChapter,
        cancel: CancellationToken,
    ) -> Result<String, GenerationError> {
        let span = generation_span("edit", &command.model);
        async move {
            let params = command.sampling.apply(self.defaults);
            let input = EditPromptInput {
                chapter_title: command.chapter_title,
                original_content: command.original_content,
            };

            let raw = dispatch(
                &self.registry,
                &command.model,
                || build_edit_prompt(&input).map_err(Into::into),
                params,
                &cancel,
            )
            .await?;

            let text = extract_chapter_text(&raw);
            tracing::info!(
                chapter = %input.chapter_title,
                original_chars = input.original_content.chars().count(),
                edited_chars = text.chars().count(),
                "Chapter edited"
            );
            Ok(text)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::commands::SamplingOverrides;
    use crate::application::ports::{LlmProviderPort, ProviderId};
    use crate::domain::continuity::PriorChapter;
    use crate::infrastructure::adapters::FakeLlmClient;

    fn registry_with(fake: Arc<FakeLlmClient>) -> Arc<ProviderRegistry> {
        let provider: Arc<dyn LlmProviderPort> = fake;
        Arc::new(ProviderRegistry::new(vec![provider]))
    }

    fn outline_command(model: &str) -> GenerateOutline {
        GenerateOutline {
            theme: "寻找失落的城市".to_string(),
            style: "冒险".to_string(),
            length: "中篇".to_string(),
            volume_count: 1,
            model: model.to_string(),
            sampling: SamplingOverrides::default(),
        }
    }

    fn chapter_command(prior_chapters: Vec<PriorChapter>) -> GenerateChapter {
        GenerateChapter {
            novel_title: "雾港".to_string(),
            core_theme: "信任与背叛".to_string(),
            volume_title: "第一卷".to_string(),
            volume_summary: "旧案重启".to_string(),
            chapter_title: "故人".to_string(),
            chapter_summary: "沈砚遇见旧搭档".to_string(),
            chapter_index: prior_chapters.len() + 1,
            total_chapters: 5,
            characters: Vec::new(),
            world_setting: "近未来港口".to_string(),
            prior_chapters,
            target_words: 1500,
            model: "openai".to_string(),
            sampling: SamplingOverrides::default(),
        }
    }

    #[tokio::test]
    async fn test_outline_parsed_with_default_sampling() {
        let fake = Arc::new(FakeLlmClient::new(
            ProviderId::OpenAi,
            "好的，以下是大纲：\n{\"title\":\"失城\",\"volumes\":[{\"title\":\"卷一\",\"summary\":\"启程\",\"chapters\":[{\"title\":\"地图\",\"summary\":\"得到地图\"}]}]}\n祝写作顺利！",
        ));
        let handler =
            GenerateOutlineHandler::new(registry_with(fake.clone()), SamplingParams::OUTLINE);

        let outline = handler.handle(outline_command("openai")).await.unwrap();
        assert_eq!(outline.title, "失城");
        assert_eq!(outline.volumes[0].chapters[0].title, "地图");

        let request = fake.last_request().unwrap();
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 2000);
        assert!(request.prompt.contains("寻找失落的城市"));
    }

    #[tokio::test]
    async fn test_outline_unparseable_reply() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "I cannot comply."));
        let handler = GenerateOutlineHandler::new(registry_with(fake), SamplingParams::OUTLINE);

        let err = handler.handle(outline_command("openai")).await.unwrap_err();
        assert!(matches!(err, GenerationError::OutlineParse(_)));
    }

    #[tokio::test]
    async fn test_unsupported_model_fails_before_network() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "{}"));
        let handler =
            GenerateOutlineHandler::new(registry_with(fake.clone()), SamplingParams::OUTLINE);

        let err = handler.handle(outline_command("gemini")).await.unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedProvider(_)));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_network() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "{}"));
        let handler =
            GenerateOutlineHandler::new(registry_with(fake.clone()), SamplingParams::OUTLINE);

        let mut command = outline_command("openai");
        command.style = String::new();
        let err = handler.handle(command).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPromptInput(ref f) if f == "style"));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_override_rejected() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "{}"));
        let handler =
            GenerateOutlineHandler::new(registry_with(fake.clone()), SamplingParams::OUTLINE);

        let mut command = outline_command("openai");
        command.sampling.temperature = Some(3.0);
        let err = handler.handle(command).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPromptInput(_)));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_chapter_text_trimmed_and_context_injected() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "  Some prose.  "));
        let handler =
            GenerateChapterHandler::new(registry_with(fake.clone()), SamplingParams::CHAPTER);

        let prior = vec![
            PriorChapter::new("雾起", "命案", "甲".repeat(600)),
            PriorChapter::new("空章", "未写", ""),
        ];
        let text = handler.handle(chapter_command(prior)).await.unwrap();
        assert_eq!(text, "Some prose.");

        let request = fake.last_request().unwrap();
        assert_eq!(request.temperature, 0.8);
        assert_eq!(request.max_tokens, 2500);
        assert!(request.prompt.contains(&format!("【雾起】\n{}", "甲".repeat(500))));
        assert!(!request.prompt.contains(&"甲".repeat(501)));
        assert!(!request.prompt.contains("【空章】"));
    }

    #[tokio::test]
    async fn test_chapters_at_or_after_target_are_not_injected() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "正文"));
        let handler =
            GenerateChapterHandler::new(registry_with(fake.clone()), SamplingParams::CHAPTER);

        let volume = vec![
            PriorChapter::new("一", "开端", "第一章正文"),
            PriorChapter::new("二", "发展", "第二章旧稿"),
            PriorChapter::new("三", "转折", "第三章正文"),
        ];
        let mut command = chapter_command(volume);
        command.chapter_index = 2;
        handler.handle(command).await.unwrap();

        let prompt = fake.last_request().unwrap().prompt;
        assert!(prompt.contains("【一】\n第一章正文"));
        assert!(!prompt.contains("【二】"));
        assert!(!prompt.contains("【三】"));
    }

    #[tokio::test]
    async fn test_chapter_sampling_override() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "正文"));
        let handler =
            GenerateChapterHandler::new(registry_with(fake.clone()), SamplingParams::CHAPTER);

        let mut command = chapter_command(Vec::new());
        command.sampling = SamplingOverrides {
            temperature: Some(1.0),
            max_tokens: None,
        };
        handler.handle(command).await.unwrap();

        let request = fake.last_request().unwrap();
        assert_eq!(request.temperature, 1.0);
        assert_eq!(request.max_tokens, 2500);
    }

    #[tokio::test]
    async fn test_edit_uses_edit_defaults() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::Anthropic, "\n修改后的正文。\n"));
        let handler = EditChapterHandler::new(registry_with(fake.clone()), SamplingParams::EDIT);

        let text = handler
            .handle(EditChapter {
                chapter_title: "雾起".to_string(),
                original_content: "原始正文".to_string(),
                model: "anthropic".to_string(),
                sampling: SamplingOverrides::default(),
            })
            .await
            .unwrap();
        assert_eq!(text, "修改后的正文。");

        let request = fake.last_request().unwrap();
        assert_eq!(request.temperature, 0.6);
        assert_eq!(request.max_tokens, 3000);
        assert!(request.prompt.contains("原始正文"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_unavailable() {
        let fake = Arc::new(FakeLlmClient::failing(ProviderId::OpenAi, "upstream exploded"));
        let handler = EditChapterHandler::new(registry_with(fake), SamplingParams::EDIT);

        let err = handler
            .handle(EditChapter {
                chapter_title: "雾起".to_string(),
                original_content: "原始正文".to_string(),
                model: "openai".to_string(),
                sampling: SamplingOverrides::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::GenerationUnavailable { .. }));
        assert!(!err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_cancelled_before_dispatch() {
        let fake = Arc::new(FakeLlmClient::new(ProviderId::OpenAi, "正文"));
        let handler =
            GenerateChapterHandler::new(registry_with(fake.clone()), SamplingParams::CHAPTER);

        let token = CancellationToken::new();
        token.cancel();
        let err = handler
            .handle_with_cancel(chapter_command(Vec::new()), token)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Cancelled));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_while_waiting_for_provider() {
        let fake = Arc::new(
            FakeLlmClient::new(ProviderId::OpenAi, "正文").with_delay(Duration::from_secs(30)),
        );
        let handler = GenerateChapterHandler::new(registry_with(fake), SamplingParams::CHAPTER);

        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = handler
            .handle_with_cancel(chapter_command(Vec::new()), token)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Cancelled));
    }
}
