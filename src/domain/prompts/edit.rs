//! 章节编辑提示词

use super::{require_text, PromptError};

/// 编辑提示词输入
#[derive(Debug, Clone)]
pub struct EditPromptInput {
    pub chapter_title: String,
    pub original_content: String,
}

const EDIT_FOCUS: &str = "【编辑重点】
1. 修正语法和拼写错误
- 纠正所有语法、标点和拼写问题
- 确保句子结构完整，避免语义不清的表达
2. 改进句子结构和段落流畅度
- 优化句式，避免重复冗余的表达
- 调整过长或过短的段落，保持适当的节奏感
- 优化段落之间的过渡，使行文更加流畅自然
3. 丰富描述和对话
- 增强场景描写的细节和感染力
- 使人物对话更加生动，更符合角色特点
- 增加适当的感官描写和情绪表达
4. 确保情节连贯性和角色一致性
- 检查并修正情节中的逻辑错误或矛盾之处
- 确保角色行为和对话与其性格设定一致
- 保持故事背景和设定的一致性
5. 提升整体阅读体验
- 强化章节的关键场景和高潮部分
- 调整叙事节奏，增强读者的代入感和阅读兴趣
- 确保章节内容与整体故事主题相呼应";

const EDIT_PRINCIPLES: &str = "【编辑原则】
- 保留原有内容的核心情节和风格特点
- 编辑应当增强而非改变作者的创作意图
- 所有修改都应当自然融入文本，不显突兀
- 注重提升文学性的同时不牺牲可读性和通俗性";

/// 构建章节编辑提示词
pub fn build_edit_prompt(input: &EditPromptInput) -> Result<String, PromptError> {
    require_text("chapter_title", &input.chapter_title)?;
    require_text("original_content", &input.original_content)?;

    Ok(format!(
        "你是一位资深的小说编辑，擅长改进和优化小说章节。
请对以下小说章节内容进行编辑和优化：

章节标题：{chapter_title}

原始内容：
{original_content}

{focus}

{principles}

请直接给出完整的优化后内容，无需解释修改内容。保持原有的章节结构，但可以适当调整以提升阅读体验。",
        chapter_title = input.chapter_title,
        original_content = input.original_content,
        focus = EDIT_FOCUS,
        principles = EDIT_PRINCIPLES,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_prompt_embeds_original_text() {
        let input = EditPromptInput {
            chapter_title: "雾起".to_string(),
            original_content: "码头发现一具尸体。".to_string(),
        };
        let prompt = build_edit_prompt(&input).unwrap();
        assert!(prompt.contains("章节标题：雾起"));
        assert!(prompt.contains("原始内容：\n码头发现一具尸体。"));
        assert!(prompt.contains("请直接给出完整的优化后内容"));
        assert_eq!(prompt, build_edit_prompt(&input).unwrap());
    }

    #[test]
    fn test_empty_content_rejected() {
        let input = EditPromptInput {
            chapter_title: "雾起".to_string(),
            original_content: "\n ".to_string(),
        };
        assert_eq!(
            build_edit_prompt(&input),
            Err(PromptError::InvalidInput("original_content".to_string()))
        );
    }
}
