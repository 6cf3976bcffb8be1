//! 领域类型
//!
//! 项目、反馈等实体共享的枚举定义。序列化格式统一为小写字符串，
//! 与前端/挂件提交的原始值保持一致。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 字符串无法转换为领域枚举时的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDomainError {
    #[error("unknown feedback type: {0}")]
    FeedbackType(String),

    #[error("unknown sentiment: {0}")]
    Sentiment(String),
}

/// 反馈类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Bug,
    Feature,
    Other,
}

impl FeedbackType {
    /// 所有合法取值，顺序与界面上的 Tab 一致
    pub const ALL: [FeedbackType; 3] = [FeedbackType::Bug, FeedbackType::Feature, FeedbackType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Bug => "bug",
            FeedbackType::Feature => "feature",
            FeedbackType::Other => "other",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 严格匹配，不做大小写转换：`"Bug"` 不是合法的反馈类型
impl FromStr for FeedbackType {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug" => Ok(FeedbackType::Bug),
            "feature" => Ok(FeedbackType::Feature),
            "other" => Ok(FeedbackType::Other),
            _ => Err(ParseDomainError::FeedbackType(s.to_string())),
        }
    }
}

/// 情感分析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(ParseDomainError::Sentiment(s.to_string())),
        }
    }
}

/// 按类型过滤反馈
///
/// `all` 表示不过滤，其余取值与 [`FeedbackType`] 一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackFilter {
    #[default]
    All,
    Only(FeedbackType),
}

impl FeedbackFilter {
    pub fn matches(&self, feedback_type: FeedbackType) -> bool {
        match self {
            FeedbackFilter::All => true,
            FeedbackFilter::Only(t) => *t == feedback_type,
        }
    }
}

impl FromStr for FeedbackFilter {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(FeedbackFilter::All);
        }
        s.parse().map(FeedbackFilter::Only)
    }
}

impl From<FeedbackType> for FeedbackFilter {
    fn from(value: FeedbackType) -> Self {
        FeedbackFilter::Only(value)
    }
}
