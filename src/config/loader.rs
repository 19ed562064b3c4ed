//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`SCRIBE_` 前缀）
//! 2. 配置文件（config.toml）
//! 3. 旧版环境变量（OPENAI_API_KEY 等）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, SamplingConfig};
use crate::application::ports::ProviderId;
use crate::domain::SamplingParams;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧版部署使用的无前缀环境变量 → 配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "ai.openai.api_key"),
    ("ANTHROPIC_API_KEY", "ai.anthropic.api_key"),
    ("CUSTOM_AI_API_URL", "ai.custom.url"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `SCRIBE_SERVER__PORT=8080`
/// - `SCRIBE_AI__OPENAI__API_KEY=sk-...`
/// - `SCRIBE_AI__CUSTOM__URL=http://llm.internal/generate`
/// - `SCRIBE_GENERATION__CHAPTER__MAX_TOKENS=4000`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3389)?
        .set_default("ai.timeout_secs", 60)?
        .set_default("ai.default_model", "openai")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    for (task, params) in [
        ("outline", SamplingParams::OUTLINE),
        ("chapter", SamplingParams::CHAPTER),
        ("edit", SamplingParams::EDIT),
    ] {
        builder = builder
            .set_default(
                format!("generation.{}.temperature", task),
                f64::from(params.temperature),
            )?
            .set_default(
                format!("generation.{}.max_tokens", task),
                i64::from(params.max_tokens),
            )?;
    }

    // 2. 旧版环境变量，仍低于配置文件和带前缀的环境变量
    for (var, key) in LEGACY_ENV_KEYS {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                builder = builder.set_default(*key, value)?;
            }
        }
    }

    // 3. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 4. 环境变量（最高优先级）
    // 例如: SCRIBE_AI__OPENAI__API_KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("SCRIBE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn validate_sampling(task: &str, sampling: SamplingConfig) -> Result<(), ConfigError> {
    SamplingParams::from(sampling)
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("generation.{}: {}", task, e)))
}

/// 验证配置有效性
///
/// 缺少密钥不算配置错误，调用时才以服务不可用的形式暴露
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.ai.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "AI request timeout cannot be 0".to_string(),
        ));
    }

    if config.ai.default_model.parse::<ProviderId>().is_err() {
        return Err(ConfigError::ValidationError(format!(
            "Unknown default model: {}",
            config.ai.default_model
        )));
    }

    validate_sampling("outline", config.generation.outline)?;
    validate_sampling("chapter", config.generation.chapter)?;
    validate_sampling("edit", config.generation.edit)?;

    Ok(())
}

fn configured(value: &Option<String>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "configured",
        _ => "missing",
    }
}

/// 打印配置信息（用于启动时日志，不输出密钥）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("AI Timeout: {}s", config.ai.timeout_secs);
    tracing::info!("AI Default Model: {}", config.ai.default_model);
    tracing::info!(
        "OpenAI: {} ({}), key {}",
        config.ai.openai.base_url,
        config.ai.openai.model,
        configured(&config.ai.openai.api_key)
    );
    tracing::info!(
        "Anthropic: {} ({}), key {}",
        config.ai.anthropic.base_url,
        config.ai.anthropic.model,
        configured(&config.ai.anthropic.api_key)
    );
    tracing::info!("Custom endpoint: {}", configured(&config.ai.custom.url));
    tracing::info!(
        "Sampling: outline {}/{}, chapter {}/{}, edit {}/{}",
        config.generation.outline.temperature,
        config.generation.outline.max_tokens,
        config.generation.chapter.temperature,
        config.generation.chapter.max_tokens,
        config.generation.edit.temperature,
        config.generation.edit.max_tokens
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
