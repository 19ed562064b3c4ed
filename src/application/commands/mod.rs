//! 应用层 - 命令
//!
//! 三类生成任务：大纲、章节、编辑

mod generation_commands;

pub mod handlers;

pub use generation_commands::*;
