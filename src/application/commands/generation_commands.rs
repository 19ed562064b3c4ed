//! Generation Commands
//!
//! 每个命令都携带生成所需的全部上下文，处理器本身不读写任何存储

use serde::Deserialize;

use crate::domain::continuity::PriorChapter;
use crate::domain::outline::Character;
use crate::domain::SamplingParams;

/// 单次调用的采样参数覆盖（未提供的字段使用任务默认值）
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SamplingOverrides {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl SamplingOverrides {
    pub fn apply(&self, defaults: SamplingParams) -> SamplingParams {
        defaults.with_overrides(self.temperature, self.max_tokens)
    }
}

/// 生成小说大纲命令
#[derive(Debug, Clone)]
pub struct GenerateOutline {
    pub theme: String,
    pub style: String,
    pub length: String,
    pub volume_count: u32,
    pub model: String,
    pub sampling: SamplingOverrides,
}

/// 生成章节内容命令
#[derive(Debug, Clone)]
pub struct GenerateChapter {
    pub novel_title: String,
    pub core_theme: String,
    pub volume_title: String,
    pub volume_summary: String,
    pub chapter_title: String,
    pub chapter_summary: String,
    /// 从 1 开始
    pub chapter_index: usize,
    pub total_chapters: usize,
    pub characters: Vec<Character>,
    pub world_setting: String,
    /// 同一分卷的章节（按顺序），只取 `chapter_index` 之前的部分
    pub prior_chapters: Vec<PriorChapter>,
    pub target_words: u32,
    pub model: String,
    pub sampling: SamplingOverrides,
}

/// 编辑章节内容命令
#[derive(Debug, Clone)]
pub struct EditChapter {
    pub chapter_title: String,
    pub original_content: String,
    pub model: String,
    pub sampling: SamplingOverrides,
}
