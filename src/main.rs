//! Scribe - AI 小说创作服务

use std::sync::Arc;

use scribe::config::{load_config, print_config};
use scribe::infrastructure::build_registry;
use scribe::infrastructure::http::{AppState, HttpServer};
use scribe::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 旧版环境变量 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("Scribe - AI 小说创作服务");
    print_config(&config);

    let registry = Arc::new(build_registry(&config.ai)?);
    tracing::info!(providers = ?registry, "Provider registry ready");

    let state = AppState::new(
        registry,
        config.generation.defaults(),
        config.ai.default_model.clone(),
    );
    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
