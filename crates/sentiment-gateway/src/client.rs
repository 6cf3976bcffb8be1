//! 基于大模型的情感分类器
//!
//! 调用 Anthropic Messages 接口，指令固定，反馈文本是唯一的变量输入。

use crate::traits::SentimentClassifierTrait;
use crate::types::{SentimentRequest, SentimentResponse};
use crate::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use shared_lib::{Sentiment, SentimentConfig};
use tracing::{debug, instrument, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// 回答只需要一个单词
const MAX_TOKENS: u32 = 16;

const SYSTEM_PROMPT: &str =
    "You classify the sentiment of product feedback. Respond with exactly one word: positive, neutral, or negative.";

/// Messages 接口请求格式
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Messages 接口响应格式，只关心文本内容
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    text: Option<String>,
}

/// 大模型情感分类器
#[derive(Debug, Clone)]
pub struct LlmSentimentClassifier {
    config: SentimentConfig,
    client: reqwest::Client,
}

impl LlmSentimentClassifier {
    /// 根据配置创建分类器
    ///
    /// 请求超时在这里统一设置，超时会作为 [`GatewayError::Http`] 返回。
    pub fn new(config: SentimentConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn prompt(request: &SentimentRequest) -> String {
        format!(
            "Analyze the sentiment of the following feedback text. Return 'positive', 'negative', or 'neutral'.\n\nFeedback Text: {}",
            request.feedback_text
        )
    }

    /// 调用模型服务，返回未经校验的标签
    async fn call_api(&self, request: &SentimentRequest) -> GatewayResult<SentimentResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: Self::prompt(request),
            }],
        };

        let url = format!("{}/v1/messages", self.config.api_url.trim_end_matches('/'));
        debug!("Calling sentiment API at {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        let sentiment = parsed
            .content
            .into_iter()
            .find_map(|c| c.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        Ok(SentimentResponse { sentiment })
    }
}

#[async_trait::async_trait]
impl SentimentClassifierTrait for LlmSentimentClassifier {
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    async fn classify(&self, text: &str) -> GatewayResult<Sentiment> {
        let request = SentimentRequest {
            feedback_text: text.to_string(),
        };

        let result = self.call_api(&request).await.and_then(|r| r.validate());
        match &result {
            Ok(sentiment) => debug!("✅ 情感分析完成: {}", sentiment),
            Err(err) => warn!("⚠️ 情感分析失败: {}", err),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct Mock {
        status: StatusCode,
        reply: Value,
        delay: Duration,
        seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    }

    async fn messages(State(mock): State<Mock>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        mock.seen.lock().await.push((headers, body));
        tokio::time::sleep(mock.delay).await;
        (mock.status, Json(mock.reply.clone()))
    }

    /// 在本地随机端口启动一个假的 Messages 接口，返回服务地址
    async fn spawn_mock(mock: Mock) -> String {
        let app = Router::new().route("/v1/messages", post(messages)).with_state(mock);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn mock(status: StatusCode, reply: Value) -> Mock {
        Mock {
            status,
            reply,
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn text_reply(text: &str) -> Value {
        json!({ "content": [{ "type": "text", "text": text }] })
    }

    fn classifier(api_url: String, timeout: Duration) -> LlmSentimentClassifier {
        LlmSentimentClassifier::new(SentimentConfig {
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            api_url,
            timeout,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn classifies_feedback_text() {
        let mock = mock(StatusCode::OK, text_reply("Negative."));
        let seen = mock.seen.clone();
        let url = spawn_mock(mock).await;

        let sentiment = classifier(url, Duration::from_secs(5))
            .classify("Button is broken on load")
            .await
            .unwrap();
        assert_eq!(sentiment, Sentiment::Negative);

        let seen = seen.lock().await;
        let (headers, body) = &seen[0];
        assert_eq!(headers["x-api-key"], "test-key");
        assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);
        assert_eq!(body["model"], "test-model");
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert!(content.ends_with("Feedback Text: Button is broken on load"));
    }

    #[tokio::test]
    async fn unexpected_label_is_an_error() {
        let url = spawn_mock(mock(StatusCode::OK, text_reply("somewhat happy"))).await;

        let err = classifier(url, Duration::from_secs(5)).classify("fine I guess").await.unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedLabel(_)));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let url = spawn_mock(mock(StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "overloaded" }))).await;

        let err = classifier(url, Duration::from_secs(5)).classify("anything at all").await.unwrap_err();
        assert!(matches!(err, GatewayError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn empty_content_is_an_error() {
        let url = spawn_mock(mock(StatusCode::OK, json!({ "content": [] }))).await;

        let err = classifier(url, Duration::from_secs(5)).classify("anything at all").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse));
    }

    #[tokio::test]
    async fn slow_api_times_out() {
        let mut slow = mock(StatusCode::OK, text_reply("positive"));
        slow.delay = Duration::from_secs(2);
        let url = spawn_mock(slow).await;

        let err = classifier(url, Duration::from_millis(100)).classify("anything at all").await.unwrap_err();
        assert!(matches!(err, GatewayError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_calling_out() {
        let classifier = LlmSentimentClassifier::new(SentimentConfig::default()).unwrap();

        let err = classifier.classify("anything at all").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured(_)));
    }
}
