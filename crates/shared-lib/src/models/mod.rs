pub mod config;
pub mod domain;
pub mod snippet;

// 重新导出具体的类型
pub use config::{AppConfig, SentimentConfig};
pub use domain::{FeedbackFilter, FeedbackType, ParseDomainError, Sentiment};
pub use snippet::{embed_snippet, DEFAULT_WIDGET_HOST};
