//! 章节生成提示词

use super::{require_text, PromptError};
use crate::domain::continuity::ContinuityContext;
use crate::domain::outline::Character;

/// 章节提示词输入
#[derive(Debug, Clone)]
pub struct ChapterPromptInput {
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
    pub continuity: ContinuityContext,
    pub target_words: u32,
}

const CONTINUITY_RULES: &str = "【上下文连贯性要求】
1. 必须严格参考前几章的内容摘要，确保故事情节连贯，前后呼应
2. 所有情节发展必须符合小说大纲和章节概要的设定，不得偏离主体大纲
3. 人物性格、能力和关系必须与前文保持一致
4. 应总结并延续上文的悬念和伏笔，巧妙地衔接前文内容
5. 当前章节内容应自然过渡到下一章内容，为后续章节做好铺垫";

const STRUCTURE_RULES: &str = "【章节结构要求】
1. 在这个章节中设置明确的小高潮或转折点，使故事情节紧凑有序
2. 通过角色对话推动情节发展，减少冗长的背景介绍和内心独白
3. 章节应具有完整的起承转合结构，包含铺垫、发展、高潮和结尾
4. 设计一到两个令人难忘的场景画面作为本章节的亮点
5. 开头第一段必须引人入胜，结尾最后一段必须留有想象空间";

const LOGIC_RULES: &str = "【逻辑性要求】
1. 确保每个情节承接自然流畅，从一个场景过渡到下一个场景时合理描述事件或情绪变化
2. 避免突然的情节转折，让读者感到突兀，通过铺垫逐步引导读者进入高潮部分
3. 人物对话必须符合其性格和处境，不应有违背人物设定的对话内容
4. 保持世界规则的一致性，不出现与已建立世界观相冲突的情节";

const CONTENT_RULES: &str = "请根据以上信息，创作一个符合章节概述的完整章节内容。内容应当包含以下要素：
1. 精彩的场景描写
2. 生动的人物对话
3. 合理的情节发展
4. 与整体小说主题和风格一致";

/// 构建章节生成提示词
pub fn build_chapter_prompt(input: &ChapterPromptInput) -> Result<String, PromptError> {
    require_text("novel_title", &input.novel_title)?;
    require_text("chapter_title", &input.chapter_title)?;

    // Vec<Character> 序列化不会失败
    let characters =
        serde_json::to_string_pretty(&input.characters).unwrap_or_else(|_| "[]".to_string());

    Ok(format!(
        "你是一位专业小说写作助手，擅长根据大纲编写章节内容。
现在，你需要根据以下信息，生成一个完整的小说章节：

小说标题：{novel_title}
小说核心主题：{core_theme}
卷标题：{volume_title}
卷概述：{volume_summary}
章节标题：{chapter_title}
章节概述：{chapter_summary}
章节位置：{chapter_index}/{total_chapters}

相关角色：
{characters}

世界设定：
{world_setting}

前几章内容摘要：
{continuity}

{continuity_rules}

{structure_rules}

{logic_rules}

{content_rules}
目标字数：{target_words}字左右

请直接生成章节的完整内容，不要包含任何前导说明。内容应该包括章节标题、多个段落的正文内容，以及合理的段落划分。",
        novel_title = input.novel_title,
        core_theme = input.core_theme,
        volume_title = input.volume_title,
        volume_summary = input.volume_summary,
        chapter_title = input.chapter_title,
        chapter_summary = input.chapter_summary,
        chapter_index = input.chapter_index,
        total_chapters = input.total_chapters,
        characters = characters,
        world_setting = input.world_setting,
        continuity = input.continuity.render(),
        continuity_rules = CONTINUITY_RULES,
        structure_rules = STRUCTURE_RULES,
        logic_rules = LOGIC_RULES,
        content_rules = CONTENT_RULES,
        target_words = input.target_words,
    ))
}
