//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{EditChapter, GenerateChapter, GenerateOutline, SamplingOverrides};
use crate::domain::continuity::PriorChapter;
use crate::domain::outline::{Character, OutlineDocument};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Outline DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateOutlineRequest {
    pub theme: String,
    pub style: String,
    pub length: String,
    #[serde(default = "default_volume_count")]
    pub volume_count: u32,
    /// 未提供时使用配置中的默认服务
    #[serde(default)]
    pub model: Option<String>,
    #[serde(flatten)]
    pub sampling: SamplingOverrides,
}

fn default_volume_count() -> u32 {
    1
}

impl GenerateOutlineRequest {
    pub fn into_command(self, default_model: &str) -> GenerateOutline {
        GenerateOutline {
            theme: self.theme,
            style: self.style,
            length: self.length,
            volume_count: self.volume_count,
            model: self.model.unwrap_or_else(|| default_model.to_string()),
            sampling: self.sampling,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub model: String,
    pub total_chapters: usize,
    pub outline: OutlineDocument,
}

// ============================================================================
// Chapter DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateChapterRequest {
    pub novel_title: String,
    #[serde(default)]
    pub core_theme: String,
    #[serde(default)]
    pub volume_title: String,
    #[serde(default)]
    pub volume_summary: String,
    pub chapter_title: String,
    #[serde(default)]
    pub chapter_summary: String,
    pub chapter_index: usize,
    pub total_chapters: usize,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub world_setting: String,
    /// 同卷章节，可以是整卷，只使用目标章节之前的部分
    #[serde(default)]
    pub prior_chapters: Vec<PriorChapter>,
    #[serde(default = "default_target_words")]
    pub target_words: u32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(flatten)]
    pub sampling: SamplingOverrides,
}

fn default_target_words() -> u32 {
    1500
}

impl GenerateChapterRequest {
    pub fn into_command(self, default_model: &str) -> GenerateChapter {
        GenerateChapter {
            novel_title: self.novel_title,
            core_theme: self.core_theme,
            volume_title: self.volume_title,
            volume_summary: self.volume_summary,
            chapter_title: self.chapter_title,
            chapter_summary: self.chapter_summary,
            chapter_index: self.chapter_index,
            total_chapters: self.total_chapters,
            characters: self.characters,
            world_setting: self.world_setting,
            prior_chapters: self.prior_chapters,
            target_words: self.target_words,
            model: self.model.unwrap_or_else(|| default_model.to_string()),
            sampling: self.sampling,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub model: String,
    pub content: String,
    pub word_count: usize,
}

// ============================================================================
// Edit DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EditChapterRequest {
    pub chapter_title: String,
    pub original_content: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(flatten)]
    pub sampling: SamplingOverrides,
}

impl EditChapterRequest {
    pub fn into_command(self, default_model: &str) -> EditChapter {
        EditChapter {
            chapter_title: self.chapter_title,
            original_content: self.original_content,
            model: self.model.unwrap_or_else(|| default_model.to_string()),
            sampling: self.sampling,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub model: String,
    pub edited_content: String,
    pub word_count: usize,
}
