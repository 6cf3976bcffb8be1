//! PulseTrack 启动入口
//!
//! 负责初始化日志、加载配置、组装存储和情感分析网关，然后启动 Web 服务。

use color_eyre::eyre::Context;
use color_eyre::Result;
use database::initialize_store;
use sentiment_gateway::LlmSentimentClassifier;
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use web_service::services::{ChangeNotifier, FeedbackService};

const DEFAULT_LOG_FILTER: &str = "pulsetrack=debug,web_service=debug,database=debug,sentiment_gateway=debug,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let app_config = AppConfig::load()?;

    if app_config.sentiment.api_key.is_none() {
        warn!("⚠️ 未设置 ANTHROPIC_API_KEY，情感分析接口将返回失败");
    }

    let store = initialize_store(Arc::clone(&app_config));
    let classifier = LlmSentimentClassifier::new(app_config.sentiment.clone()).context("Failed to build sentiment client")?;

    let service = Arc::new(FeedbackService::new(
        Arc::new(store),
        Arc::new(classifier),
        ChangeNotifier::new(app_config.event_channel_capacity),
        app_config.widget_host.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut web = tokio::spawn(web_service::start_web_service(Arc::clone(&app_config), service, shutdown_rx));

    tokio::select! {
        result = &mut web => {
            // 服务自己退出了（例如端口被占用），不需要再发送关闭信号
            return result.context("Web service task panicked")?;
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                error!("❌ 监听 Ctrl-C 失败: {}", err);
            }
            info!("🛑 收到关闭信号，开始关闭服务...");
        }
    }

    // 接收端都已退出时发送失败，可以忽略
    let _ = shutdown_tx.send(true);
    web.await.context("Web service task panicked")??;

    info!("👋 服务已关闭");
    Ok(())
}
