//! 大纲提示词

use super::{require_text, PromptError};

/// 每卷要求的最少章节数
pub const MIN_CHAPTERS_PER_VOLUME: usize = 5;

/// 大纲提示词输入
#[derive(Debug, Clone)]
pub struct OutlinePromptInput {
    pub theme: String,
    pub style: String,
    pub length: String,
    pub volume_count: u32,
}

const SCHEMA_SKELETON: &str = r#"{
"title": "小说标题",
"core_theme": "核心主题与思想",
"characters": [
{
"name": "角色名",
"role": "角色类型(主角/配角/反派)",
"description": "角色描述"
}
],
"synopsis": "故事概述，500字左右",
"volumes": [
{
"title": "分卷标题",
"summary": "分卷概述",
"chapters": [
{
"title": "章节标题",
"summary": "章节概述"
}
]
}
],
"world_setting": "世界观设定"
}"#;

const CHARACTER_RULES: &str = "【人物塑造要求】
1. 主角应有明确的动机和目标，有独特的性格特点和内在冲突
2. 配角应能推动主角成长或情节发展，不可只是背景人物
3. 反派角色需有合理动机，避免单纯的\"邪恶\"形象
4. 每个角色需设置成长弧线，随着故事发展有所变化";

const STRUCTURE_RULES: &str = "【故事结构要求】
1. 开篇需要有吸引人的引子，建立明确的故事基调
2. 中间部分需设置递进式的冲突，保持紧张感和阅读兴趣
3. 故事高潮部分必须有足够的铺垫，不可突兀出现
4. 结局应该合理解决主要冲突，同时可留有余地";

const FORMAT_RULES: &str = "技术要求：
1. 参考上述JSON格式
2. 所有字符串必须使用双引号
3. 所有数组和对象必须正确闭合
4. 最后一个属性后不要加逗号
5. world_setting必须是最后一个属性

请严格按照JSON格式返回，只返回一个JSON对象，不要包含任何额外的说明文字。";

/// 构建大纲生成提示词
pub fn build_outline_prompt(input: &OutlinePromptInput) -> Result<String, PromptError> {
    require_text("theme", &input.theme)?;
    require_text("style", &input.style)?;
    require_text("length", &input.length)?;

    Ok(format!(
        "你是一位专业的小说策划师，精通小说结构设计和故事架构设计。
现在需要你根据以下信息，生成一个完整的小说大纲：
- 小说主题：{theme}
- 写作风格：{style}
- 小说预期长度：{length}
- 分卷数量：{volume_count}

请设计包含标题、主题、人物设定、故事概述和详细的分卷计划。必须包含以下全部字段：title、core_theme、characters、synopsis、volumes、world_setting。回复前请再次检查，不要遗漏字段，格式示例如下：

{skeleton}

创作要求：
1. 必须恰好设计{volume_count}个分卷，每个分卷必须包含至少{min_chapters}个章节，每个章节必须有明确的标题和内容概述
2. 角色设计应符合故事主题和风格，主要角色应有鲜明的性格特点和成长弧线
3. 故事概述应包含完整的起承转合，包括设定场景、冲突、高潮和结局
4. 世界观设定应当完整并与故事情节紧密结合

{character_rules}

{structure_rules}

{format_rules}",
        theme = input.theme,
        style = input.style,
        length = input.length,
        volume_count = input.volume_count,
        skeleton = SCHEMA_SKELETON,
        min_chapters = MIN_CHAPTERS_PER_VOLUME,
        character_rules = CHARACTER_RULES,
        structure_rules = STRUCTURE_RULES,
        format_rules = FORMAT_RULES,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interpreter::parse_outline;

    fn input() -> OutlinePromptInput {
        OutlinePromptInput {
            theme: "寻找失落的城市".to_string(),
            style: "冒险".to_string(),
            length: "中篇".to_string(),
            volume_count: 3,
        }
    }

    #[test]
    fn test_outline_prompt_is_deterministic() {
        let a = build_outline_prompt(&input()).unwrap();
        let b = build_outline_prompt(&input()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_outline_prompt_carries_inputs_and_rules() {
        let prompt = build_outline_prompt(&input()).unwrap();
        assert!(prompt.contains("小说主题：寻找失落的城市"));
        assert!(prompt.contains("分卷数量：3"));
        assert!(prompt.contains("至少5个章节"));
        assert!(prompt.contains("world_setting必须是最后一个属性"));
        assert!(prompt.contains("最后一个属性后不要加逗号"));
    }

    #[test]
    fn test_schema_skeleton_is_valid_outline_json() {
        let skeleton = parse_outline(SCHEMA_SKELETON).unwrap();
        assert_eq!(skeleton.volumes.len(), 1);
        assert_eq!(skeleton.world_setting, "世界观设定");
        let prompt = build_outline_prompt(&input()).unwrap();
        assert!(prompt.contains(SCHEMA_SKELETON));
    }

    #[test]
    fn test_missing_theme_rejected() {
        let mut bad = input();
        bad.theme = "  ".to_string();
        assert_eq!(
            build_outline_prompt(&bad),
            Err(PromptError::InvalidInput("theme".to_string()))
        );
    }

    #[test]
    fn test_volume_count_is_not_range_checked() {
        let mut input = input();
        input.volume_count = 0;
        let prompt = build_outline_prompt(&input).unwrap();
        assert!(prompt.contains("分卷数量：0"));
    }
}
