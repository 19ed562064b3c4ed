//! Outline Context - Entities
//!
//! 大纲文档由 LLM 回复解析而来，只做结构映射，不做额外的模式校验：
//! 缺失或为 null 的字段取空值，未知字段忽略。

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// 角色类型
///
/// 序列化为中文标签（与小说数据模型一致），反序列化时同时接受英文标签，
/// 其余取值原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum CharacterRole {
    /// 主角
    Protagonist,
    /// 配角
    Supporting,
    /// 反派
    Antagonist,
    /// 模型返回的其他标签
    Other(String),
}

impl CharacterRole {
    pub fn as_str(&self) -> &str {
        match self {
            CharacterRole::Protagonist => "主角",
            CharacterRole::Supporting => "配角",
            CharacterRole::Antagonist => "反派",
            CharacterRole::Other(label) => label,
        }
    }
}

impl Default for CharacterRole {
    fn default() -> Self {
        CharacterRole::Other(String::new())
    }
}

impl From<String> for CharacterRole {
    fn from(label: String) -> Self {
        match label.trim() {
            "主角" | "protagonist" | "Protagonist" => CharacterRole::Protagonist,
            "配角" | "supporting" | "Supporting" => CharacterRole::Supporting,
            "反派" | "antagonist" | "Antagonist" => CharacterRole::Antagonist,
            _ => CharacterRole::Other(label),
        }
    }
}

impl<'de> Deserialize<'de> for CharacterRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::string(deserializer).map(CharacterRole::from)
    }
}

impl From<CharacterRole> for String {
    fn from(role: CharacterRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 角色设定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub role: CharacterRole,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub personality: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub background: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub goals: Option<String>,
}

/// 章节规划（标题 + 概述）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterPlan {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
}

/// 分卷规划
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumePlan {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::seq")]
    pub chapters: Vec<ChapterPlan>,
}

/// 小说大纲
///
/// 字段名与提示词中给出的 JSON 骨架一致（snake_case）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineDocument {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub core_theme: String,
    #[serde(deserialize_with = "lenient::seq")]
    pub characters: Vec<Character>,
    #[serde(deserialize_with = "lenient::string")]
    pub synopsis: String,
    #[serde(deserialize_with = "lenient::seq")]
    pub volumes: Vec<VolumePlan>,
    #[serde(deserialize_with = "lenient::string")]
    pub world_setting: String,
}

impl OutlineDocument {
    /// 所有分卷的章节总数
    pub fn total_chapters(&self) -> usize {
        self.volumes.iter().map(|v| v.chapters.len()).sum()
    }
}
