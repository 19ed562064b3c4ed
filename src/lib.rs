//! Scribe - AI 小说创作服务
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Outline: 大纲文档与角色设定
//! - Prompts: 大纲、章节、编辑三类提示词构造
//! - Continuity: 前文衔接上下文
//! - Interpreter: 模型回复解析
//!
//! 应用层 (application/):
//! - Ports: LlmProviderPort 端口定义
//! - Registry: 模型服务注册表
//! - Commands: 生成命令处理器
//! - Queries: 模型列表查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: OpenAI / Anthropic / 自定义端点客户端
//! - Logging: tracing 初始化

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
