//! 情感分析网关模块
//!
//! 把反馈文本发送给外部的文本分类能力（大模型），拿回 positive / neutral / negative 三者之一。
//!
//! 网关本身不重试、不缓存；调用失败时返回 [`GatewayError`]，由调用方决定如何提示用户。
//! 上层只依赖 [`SentimentClassifierTrait`]，测试时可以替换为固定结果的实现。

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::LlmSentimentClassifier;
pub use error::{GatewayError, GatewayResult};
pub use traits::SentimentClassifierTrait;
pub use types::{SentimentRequest, SentimentResponse};
