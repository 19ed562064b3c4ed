//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    EditChapterHandler, GenerateChapterHandler, GenerateOutlineHandler, GenerationDefaults,
    // Query handlers
    ListSupportedModelsHandler,
    ProviderRegistry,
};

/// 应用状态
///
/// 不持有任何存储，处理器共享同一个模型服务注册表
pub struct AppState {
    /// 请求未指定模型时使用
    pub default_model: String,

    // ========== Command Handlers ==========
    pub generate_outline_handler: GenerateOutlineHandler,
    pub generate_chapter_handler: GenerateChapterHandler,
    pub edit_chapter_handler: EditChapterHandler,

    // ========== Query Handlers ==========
    pub list_models_handler: ListSupportedModelsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        registry: Arc<ProviderRegistry>,
        defaults: GenerationDefaults,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            default_model: default_model.into(),

            generate_outline_handler: GenerateOutlineHandler::new(
                registry.clone(),
                defaults.outline,
            ),
            generate_chapter_handler: GenerateChapterHandler::new(
                registry.clone(),
                defaults.chapter,
            ),
            edit_chapter_handler: EditChapterHandler::new(registry.clone(), defaults.edit),

            list_models_handler: ListSupportedModelsHandler::new(registry),
        }
    }
}
