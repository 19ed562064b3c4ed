//! Outline Context - 大纲限界上下文
//!
//! 职责:
//! - 大纲文档结构（标题、主题、人物、概述、分卷、世界观）
//! - 分卷与章节规划

mod entities;
mod lenient;

pub use entities::{Character, CharacterRole, ChapterPlan, OutlineDocument, VolumePlan};
