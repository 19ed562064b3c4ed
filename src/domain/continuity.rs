//! 前文连贯性上下文
//!
//! 从目标章节之前的章节中截取摘录，拼成注入章节提示词的前文摘要。
//! 每章最多保留 [`EXCERPT_MAX_CHARS`] 个字符，控制提示词长度。

use serde::{Deserialize, Serialize};

/// 每章摘录的最大字符数
pub const EXCERPT_MAX_CHARS: usize = 500;

/// 调用方提供的前文章节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorChapter {
    pub title: String,
    pub summary: String,
    pub content: String,
}

impl PriorChapter {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            content: content.into(),
        }
    }
}

/// 单个前文章节的摘录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityEntry {
    pub title: String,
    pub summary: String,
    pub excerpt: String,
}

/// 前文连贯性上下文（每次生成时重新计算，不缓存）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuityContext {
    entries: Vec<ContinuityEntry>,
}

impl ContinuityContext {
    pub fn entries(&self) -> &[ContinuityEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 渲染为 `【标题】\n摘录` 块，块之间以空行分隔
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("【{}】\n{}", entry.title, entry.excerpt))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// 截取前 `max_chars` 个字符（按 Unicode 字符计数，不会切断多字节字符）
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// 组装前文上下文
///
/// 按原顺序遍历前文章节，跳过没有正文的章节。
pub fn assemble_continuity(prior_chapters: &[PriorChapter]) -> ContinuityContext {
    let entries = prior_chapters
        .iter()
        .filter(|chapter| !chapter.content.is_empty())
        .map(|chapter| ContinuityEntry {
            title: chapter.title.clone(),
            summary: chapter.summary.clone(),
            excerpt: truncate_chars(&chapter.content, EXCERPT_MAX_CHARS).to_string(),
        })
        .collect();

    ContinuityContext { entries }
}

/// 从分卷的全部章节中取出目标章节之前的章节
///
/// `chapter_index` 从 1 开始；超出范围时返回全部章节。
pub fn preceding_chapters(volume_chapters: &[PriorChapter], chapter_index: usize) -> &[PriorChapter] {
    let end = chapter_index.saturating_sub(1).min(volume_chapters.len());
    &volume_chapters[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, len: usize) -> PriorChapter {
        PriorChapter::new(title, format!("{}概述", title), "字".repeat(len))
    }

    #[test]
    fn test_excerpts_are_capped_in_order() {
        let prior = vec![chapter("一", 100), chapter("二", 600), chapter("三", 10)];
        let context = assemble_continuity(&prior);

        let lengths: Vec<usize> = context
            .entries()
            .iter()
            .map(|e| e.excerpt.chars().count())
            .collect();
        assert_eq!(lengths, vec![100, 500, 10]);

        let titles: Vec<&str> = context.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["一", "二", "三"]);
    }

    #[test]
    fn test_chapters_without_content_are_skipped() {
        let prior = vec![
            chapter("一", 20),
            PriorChapter::new("二", "未写", ""),
            chapter("三", 5),
        ];
        let context = assemble_continuity(&prior);
        assert_eq!(context.entries().len(), 2);
        assert_eq!(context.entries()[1].title, "三");
        assert_eq!(context.entries()[1].summary, "三概述");
    }

    #[test]
    fn test_render_format() {
        let prior = vec![
            PriorChapter::new("开端", "", "雨夜。"),
            PriorChapter::new("重逢", "", "故人来。"),
        ];
        let rendered = assemble_continuity(&prior).render();
        assert_eq!(rendered, "【开端】\n雨夜。\n\n【重逢】\n故人来。");
    }

    #[test]
    fn test_empty_input_renders_empty() {
        let context = assemble_continuity(&[]);
        assert!(context.is_empty());
        assert_eq!(context.render(), "");
    }

    #[test]
    fn test_truncate_mixed_width_text() {
        let text = format!("{}{}", "ab".repeat(200), "汉字".repeat(100));
        let excerpt = truncate_chars(&text, EXCERPT_MAX_CHARS);
        assert_eq!(excerpt.chars().count(), 500);
        assert!(excerpt.ends_with('字'));
    }

    #[test]
    fn test_preceding_chapters() {
        let volume = vec![chapter("一", 1), chapter("二", 1), chapter("三", 1)];
        assert_eq!(preceding_chapters(&volume, 1).len(), 0);
        assert_eq!(preceding_chapters(&volume, 3).len(), 2);
        assert_eq!(preceding_chapters(&volume, 9).len(), 3);
        assert_eq!(preceding_chapters(&volume, 0).len(), 0);
    }
}
