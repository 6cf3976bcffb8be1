use crate::GatewayResult;
use shared_lib::Sentiment;

/// 情感分类器特征
///
/// 实现需要可以作为 `Arc<dyn SentimentClassifierTrait>` 在多个请求之间共享，
/// 因此要求 [`Send`] + [`Sync`]。
#[async_trait::async_trait]
pub trait SentimentClassifierTrait: Send + Sync + 'static {
    /// 对一段反馈文本做情感分类
    ///
    /// 只有拿到三种合法标签之一时才返回 `Ok`，其余情况一律视为失败。
    async fn classify(&self, text: &str) -> GatewayResult<Sentiment>;
}
