//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，包括：
//! - 领域类型（反馈类型、情感标签、过滤条件）
//! - 程序配置
//! - 嵌入脚本生成

pub mod models;

// 重新导出常用类型
pub use models::{
    embed_snippet, AppConfig, FeedbackFilter, FeedbackType, ParseDomainError, Sentiment, SentimentConfig,
    DEFAULT_WIDGET_HOST,
};
