//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::GenerationDefaults;
use crate::domain::SamplingParams;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 模型服务配置
    #[serde(default)]
    pub ai: AiConfig,

    /// 生成参数默认值
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3389
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 模型服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,

    /// 调用方未指定模型时使用的服务
    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub anthropic: AnthropicConfig,

    #[serde(default)]
    pub custom: CustomConfig,
}

fn default_ai_timeout() -> u64 {
    60
}

fn default_model() -> String {
    "openai".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_ai_timeout(),
            default_model: default_model(),
            openai: OpenAiConfig::default(),
            anthropic: AnthropicConfig::default(),
            custom: CustomConfig::default(),
        }
    }
}

/// OpenAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

/// Anthropic 配置
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,

    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// anthropic-version 请求头
    #[serde(default = "default_anthropic_version")]
    pub version: String,
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_anthropic_base_url(),
            model: default_anthropic_model(),
            version: default_anthropic_version(),
        }
    }
}

/// 自定义端点配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomConfig {
    /// 完整端点 URL
    #[serde(default)]
    pub url: Option<String>,
}

/// 单个任务的采样参数配置
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<SamplingParams> for SamplingConfig {
    fn from(params: SamplingParams) -> Self {
        Self {
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

impl From<SamplingConfig> for SamplingParams {
    fn from(config: SamplingConfig) -> Self {
        SamplingParams::new(config.temperature, config.max_tokens)
    }
}

/// 生成参数配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_outline_sampling")]
    pub outline: SamplingConfig,

    #[serde(default = "default_chapter_sampling")]
    pub chapter: SamplingConfig,

    #[serde(default = "default_edit_sampling")]
    pub edit: SamplingConfig,
}

fn default_outline_sampling() -> SamplingConfig {
    SamplingParams::OUTLINE.into()
}

fn default_chapter_sampling() -> SamplingConfig {
    SamplingParams::CHAPTER.into()
}

fn default_edit_sampling() -> SamplingConfig {
    SamplingParams::EDIT.into()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            outline: default_outline_sampling(),
            chapter: default_chapter_sampling(),
            edit: default_edit_sampling(),
        }
    }
}

impl GenerationConfig {
    pub fn defaults(&self) -> GenerationDefaults {
        GenerationDefaults {
            outline: self.outline.into(),
            chapter: self.chapter.into(),
            edit: self.edit.into(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
