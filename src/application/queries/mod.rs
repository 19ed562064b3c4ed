//! 应用层 - 查询（读操作）

mod model_queries;

pub mod handlers;

pub use model_queries::*;
