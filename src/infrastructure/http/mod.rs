//! HTTP Layer - RESTful API
//!
//! 无状态传输层：请求体携带生成所需的全部上下文

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
