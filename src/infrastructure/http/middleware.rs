//! HTTP Middleware
//!
//! 请求日志中间件

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 请求日志中间件
///
/// 记录每个请求的耗时；状态码为 4xx 或 5xx 时提升日志级别
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            "HTTP request"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::util::ServiceExt;

    async fn echo(body: String) -> String {
        body
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/echo", post(echo))
            .layer(axum::middleware::from_fn(request_logging_middleware))
    }

    #[tokio::test]
    async fn test_response_passes_through() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from("第一章"))
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], "第一章".as_bytes());
    }

    #[tokio::test]
    async fn test_wrong_method_is_client_error() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/echo")
            .body(Body::empty())
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
