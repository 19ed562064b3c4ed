//! 模型回复解析
//!
//! 大纲回复采用两段式解析：先整体按 JSON 解析，失败后截取第一个 `{`
//! 到最后一个 `}` 之间的内容再解析一次。不做更复杂的修复。

use serde_json::Value;
use thiserror::Error;

use super::outline::OutlineDocument;

/// 大纲解析错误（携带原始文本以便排查）
#[derive(Debug, Error)]
pub enum OutlineParseError {
    #[error("无法解析AI返回的内容")]
    NoJsonObject { raw: String },

    #[error("AI返回的JSON格式不正确: {message}")]
    MalformedJson { message: String, raw: String },
}

impl OutlineParseError {
    /// 原始回复文本
    pub fn raw(&self) -> &str {
        match self {
            OutlineParseError::NoJsonObject { raw } => raw,
            OutlineParseError::MalformedJson { raw, .. } => raw,
        }
    }
}

/// 尝试把文本解析为 JSON 对象并映射为大纲
fn parse_object(text: &str) -> Result<OutlineDocument, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("top-level JSON value is not an object"));
    }
    serde_json::from_value(value)
}

/// 贪婪截取第一个 `{` 到最后一个 `}` 的片段
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// 解析大纲回复
pub fn parse_outline(raw: &str) -> Result<OutlineDocument, OutlineParseError> {
    if let Ok(outline) = parse_object(raw) {
        return Ok(outline);
    }

    let span = brace_span(raw).ok_or_else(|| OutlineParseError::NoJsonObject {
        raw: raw.to_string(),
    })?;

    parse_object(span).map_err(|e| OutlineParseError::MalformedJson {
        message: e.to_string(),
        raw: raw.to_string(),
    })
}

/// 提取章节正文（仅去除首尾空白）
pub fn extract_chapter_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// 统计字数（按 Unicode 字符计）
pub fn count_words(text: &str) -> usize {
    text.chars().count()
}
