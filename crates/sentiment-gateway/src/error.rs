use thiserror::Error;

/// 情感分析网关错误类型
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 没有配置API Key
    #[error("sentiment classifier is not configured: {0}")]
    NotConfigured(String),

    /// 网络错误、超时、响应体无法解析
    #[error("sentiment request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 模型服务返回了非2xx状态码
    #[error("sentiment API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// 模型服务没有返回任何文本
    #[error("sentiment API returned an empty response")]
    EmptyResponse,

    /// 返回的标签不在 positive / neutral / negative 之内
    #[error("sentiment API returned an unexpected label: {0:?}")]
    UnexpectedLabel(String),
}

/// 网关操作结果类型
pub type GatewayResult<T> = Result<T, GatewayError>;
