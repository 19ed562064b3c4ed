//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// 请求体上限（章节原文可能较长）
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// 构建带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS 配置 - 允许所有来源的跨域请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    create_routes()
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone());
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt;

    use crate::application::{GenerationDefaults, ProviderRegistry};

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let state = AppState::new(
            Arc::new(ProviderRegistry::new(vec![])),
            GenerationDefaults::default(),
            "openai",
        );
        let router = build_router(Arc::new(state));

        let request = Request::builder()
            .method("POST")
            .uri("/api/ai/edit")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(vec![b' '; BODY_LIMIT_BYTES + 1]))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), http::StatusCode::PAYLOAD_TOO_LARGE);
    }
}
