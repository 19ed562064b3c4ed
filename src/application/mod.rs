//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（LlmProviderPort）
//! - registry: 模型服务注册表
//! - commands: 生成命令及处理器（大纲、章节、编辑）
//! - queries: 查询及处理器（支持的模型列表）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod registry;

// Re-exports
pub use commands::{
    EditChapter, GenerateChapter, GenerateOutline, SamplingOverrides,
    // Handlers
    handlers::{
        EditChapterHandler, GenerateChapterHandler, GenerateOutlineHandler, GenerationDefaults,
    },
};

pub use error::{GenerationError, UNAVAILABLE_MESSAGE};

pub use ports::{CompletionRequest, LlmProviderPort, ProviderError, ProviderId};

pub use queries::{handlers::ListSupportedModelsHandler, ListSupportedModels};

pub use registry::{ModelInfo, ProviderRegistry};
