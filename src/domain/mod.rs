//! Domain Layer - 领域层
//!
//! 纯逻辑，不做任何 I/O:
//! - Outline Context: 大纲文档结构
//! - Prompts: 三类生成任务的提示词构建
//! - Interpreter: 模型回复解析
//! - Continuity: 前文连贯性上下文组装

pub mod continuity;
pub mod interpreter;
pub mod outline;
pub mod prompts;

mod sampling;

pub use continuity::{assemble_continuity, preceding_chapters, ContinuityContext, PriorChapter};
pub use interpreter::{count_words, extract_chapter_text, parse_outline, OutlineParseError};
pub use sampling::SamplingParams;
