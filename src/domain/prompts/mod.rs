//! Prompt Builder - 提示词构建
//!
//! 三类任务各一个纯函数：相同输入得到完全相同的提示词文本。
//! 必填字段缺失时返回 [`PromptError::InvalidInput`]。

mod chapter;
mod edit;
mod outline;

use thiserror::Error;

pub use chapter::{build_chapter_prompt, ChapterPromptInput};
pub use edit::{build_edit_prompt, EditPromptInput};
pub use outline::{build_outline_prompt, OutlinePromptInput};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("缺少必填字段: {0}")]
    InvalidInput(String),
}

/// 校验字符串字段非空（去除首尾空白后）
fn require_text(field: &str, value: &str) -> Result<(), PromptError> {
    if value.trim().is_empty() {
        return Err(PromptError::InvalidInput(field.to_string()));
    }
    Ok(())
}
