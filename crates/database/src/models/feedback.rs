//! 反馈存储模型
//!
//! 定义反馈相关的存储结构体

use chrono::{DateTime, Utc};
use shared_lib::{FeedbackType, Sentiment};

/// 反馈信息结构体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: String,
    pub project_id: String,
    pub feedback_type: FeedbackType,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    /// 按添加顺序保存的标签，不允许重复（区分大小写）
    pub labels: Vec<String>,
    /// 情感分析结果，分析成功之前为 `None`
    pub sentiment: Option<Sentiment>,
}

impl Feedback {
    /// 追加标签，已存在时不做任何修改
    pub fn add_label(&mut self, label: &str) -> LabelOutcome {
        if self.labels.iter().any(|l| l == label) {
            return LabelOutcome::AlreadyPresent;
        }
        self.labels.push(label.to_string());
        LabelOutcome::Added
    }
}

/// 反馈创建参数
#[derive(Debug, Clone)]
pub struct FeedbackCreate {
    pub project_id: String,
    pub feedback_type: FeedbackType,
    pub comment: String,
}

/// 添加标签的结果
///
/// 重复添加不是错误，调用方可以据此决定是否需要通知界面刷新
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOutcome {
    Added,
    AlreadyPresent,
}
