use crate::models::snippet::DEFAULT_WIDGET_HOST;
use color_eyre::eyre::Context;
use color_eyre::{Help, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// 情感分析网关配置
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// 模型服务的API Key
    ///
    /// 可通过环境变量 `ANTHROPIC_API_KEY` 设置。未设置时服务仍可启动，但情感分析请求会直接失败。
    pub api_key: Option<String>,

    /// 使用的模型，环境变量 `SENTIMENT_MODEL`
    pub model: String,

    /// 模型服务地址（不含 `/v1/messages`），环境变量 `SENTIMENT_API_URL`
    ///
    /// 测试时可以指向本地的mock服务
    pub api_url: String,

    /// 单次请求超时时间，环境变量 `SENTIMENT_TIMEOUT_SECS`
    pub timeout: Duration,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "claude-3-5-haiku-20241022".to_string(),
            api_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP服务监听地址，环境变量 `BIND_ADDR`
    pub bind_addr: SocketAddr,

    /// 嵌入脚本中挂件的地址，环境变量 `WIDGET_HOST`
    pub widget_host: String,

    /// 启动时是否写入演示数据，环境变量 `SEED_DEMO_DATA`
    pub seed_demo_data: bool,

    /// 变更通知广播通道的容量，环境变量 `EVENT_CHANNEL_CAPACITY`
    ///
    /// 订阅者处理过慢时会丢失较早的通知（只影响界面刷新，不影响数据）
    pub event_channel_capacity: usize,

    /// 情感分析配置
    pub sentiment: SentimentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        if dotenvy::dotenv().is_err() {
            tracing::debug!("未找到 .env 文件，直接使用环境变量");
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 从任意键值来源构建配置
    ///
    /// [`AppConfig::load`] 使用进程环境变量，测试时可以传入自定义的查找函数。
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .context("Can not parse BIND_ADDR")
            .suggestion("BIND_ADDR 需要是 `ip:port` 格式，例如 0.0.0.0:8080")?;

        let defaults = SentimentConfig::default();

        Ok(AppConfig {
            bind_addr,
            widget_host: lookup("WIDGET_HOST").unwrap_or_else(|| DEFAULT_WIDGET_HOST.to_string()),
            seed_demo_data: lookup("SEED_DEMO_DATA").map_or(true, |s| s.parse().unwrap_or(true)),
            event_channel_capacity: lookup("EVENT_CHANNEL_CAPACITY").map_or(64, |s| s.parse().unwrap_or(64)),
            sentiment: SentimentConfig {
                api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
                model: lookup("SENTIMENT_MODEL").unwrap_or(defaults.model),
                api_url: lookup("SENTIMENT_API_URL").unwrap_or(defaults.api_url),
                timeout: lookup("SENTIMENT_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .map_or(defaults.timeout, Duration::from_secs),
            },
        })
    }
}
