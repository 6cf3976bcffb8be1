//! 网关边界上的数据结构
//!
//! 请求只有一个变量：反馈文本；响应只有一个字段：情感标签（原始字符串，尚未校验）。

use crate::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use shared_lib::Sentiment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentRequest {
    pub feedback_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentResponse {
    pub sentiment: String,
}

impl SentimentResponse {
    /// 把模型返回的原始标签转换为 [`Sentiment`]
    ///
    /// 去掉首尾空白、引号、句号等非字母字符并转为小写后，必须恰好是三种标签之一。
    pub fn validate(&self) -> GatewayResult<Sentiment> {
        let normalized = self
            .sentiment
            .trim()
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();

        normalized
            .parse()
            .map_err(|_| GatewayError::UnexpectedLabel(self.sentiment.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(label: &str) -> SentimentResponse {
        SentimentResponse {
            sentiment: label.to_string(),
        }
    }

    #[test]
    fn accepts_labels_with_noise_around_them() {
        assert_eq!(response("negative").validate().unwrap(), Sentiment::Negative);
        assert_eq!(response(" Positive.\n").validate().unwrap(), Sentiment::Positive);
        assert_eq!(response("'neutral'").validate().unwrap(), Sentiment::Neutral);
    }

    #[test]
    fn rejects_out_of_vocabulary_labels() {
        let err = response("mixed").validate().unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedLabel(label) if label == "mixed"));

        assert!(response("The sentiment is negative").validate().is_err());
        assert!(response("").validate().is_err());
    }

    #[test]
    fn request_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(SentimentRequest {
            feedback_text: "hello".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "feedbackText": "hello" }));
    }
}
