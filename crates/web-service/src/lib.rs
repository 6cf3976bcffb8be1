//! Web服务模块
//!
//! 提供 HTTP API 接口、变更事件推送和文档服务

use color_eyre::eyre::Context;
use color_eyre::Result;
use services::FeedbackService;
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
///
/// `shutdown_rx` 用于在服务关闭时结束长连接（SSE），否则优雅关闭会一直等待这些连接。
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeedbackService>,
    pub shutdown_rx: Receiver<bool>,
}

/// 启动 Web 服务
pub async fn start_web_service(config: Arc<AppConfig>, service: Arc<FeedbackService>, mut shutdown_rx: Receiver<bool>) -> Result<()> {
    let shared_state = AppState {
        service,
        shutdown_rx: shutdown_rx.clone(),
    };

    let router = routes::create_app_router(shared_state);

    info!("🚀 启动 Web Service 在 {}", config.bind_addr);
    info!("📖 在线文档地址: http://{}/docs", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃同样视为关闭信号
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
