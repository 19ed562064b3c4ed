//! Model Queries

/// 列出支持的模型查询
#[derive(Debug, Clone)]
pub struct ListSupportedModels;
