use crate::models::extract::ActionInput;
use chrono::{DateTime, Utc};
use database::FeedbackCreate;
use serde::{Deserialize, Serialize};
use shared_lib::{FeedbackFilter, FeedbackType, ParseDomainError, Sentiment};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

const INVALID_TYPE_MESSAGE: &str = "Invalid feedback type. Expected 'bug' | 'feature' | 'other'.";

/// 反馈类型必须是 bug / feature / other 之一，不做默认值推断
fn validate_feedback_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<FeedbackType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("feedback_type").with_message(Cow::Borrowed(INVALID_TYPE_MESSAGE)))
}

/// 提交反馈的请求体
#[derive(Deserialize, Debug, ToSchema, Validate, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmit {
    #[schema(example = "bug")]
    #[serde(rename = "type", default)]
    #[validate(
        required(message = "You need to select a feedback type."),
        custom(function = "validate_feedback_type")
    )]
    /// 反馈类型：bug / feature / other
    pub feedback_type: Option<String>,

    #[schema(example = "Button is broken on load")]
    #[serde(default)]
    #[validate(
        required(message = "Comment is required."),
        length(min = 10, message = "Comment must be at least 10 characters.")
    )]
    /// 反馈内容，至少10个字符
    pub comment: Option<String>,

    #[schema(example = "proj_1")]
    #[serde(default)]
    #[validate(required(message = "Project id is required."))]
    /// 所属项目ID
    pub project_id: Option<String>,
}

impl FeedbackSubmit {
    /// 校验并转换为存储层的创建参数
    ///
    /// 任何一个字段不合法都会整体失败。
    pub fn validated(self) -> Result<FeedbackCreate, ValidationErrors> {
        self.validate()?;

        let feedback_type = match self.feedback_type.as_deref().map(str::parse::<FeedbackType>) {
            Some(Ok(t)) => t,
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "feedback_type",
                    ValidationError::new("feedback_type").with_message(Cow::Borrowed(INVALID_TYPE_MESSAGE)),
                );
                return Err(errors);
            }
        };

        Ok(FeedbackCreate {
            project_id: self.project_id.unwrap_or_default(),
            feedback_type,
            comment: self.comment.unwrap_or_default(),
        })
    }
}

impl ActionInput for FeedbackSubmit {
    const INVALID_MESSAGE: &'static str = "Missing Fields. Failed to Submit Feedback.";
    const STRING_FIELDS: &'static [&'static str] = &["type", "comment", "projectId"];
}

/// 挂件提交反馈的请求体，项目通过URL中的项目公钥确定
#[derive(Deserialize, Debug, ToSchema, Default, Clone)]
pub struct WidgetFeedbackSubmit {
    #[schema(example = "feature")]
    #[serde(rename = "type", default)]
    pub feedback_type: Option<String>,

    #[schema(example = "Please add a dark mode")]
    #[serde(default)]
    pub comment: Option<String>,
}

impl WidgetFeedbackSubmit {
    pub fn for_project(self, project_id: String) -> FeedbackSubmit {
        FeedbackSubmit {
            feedback_type: self.feedback_type,
            comment: self.comment,
            project_id: Some(project_id),
        }
    }
}

impl ActionInput for WidgetFeedbackSubmit {
    const INVALID_MESSAGE: &'static str = FeedbackSubmit::INVALID_MESSAGE;
    const STRING_FIELDS: &'static [&'static str] = &["type", "comment"];
}

/// 反馈信息
#[derive(Deserialize, Debug, ToSchema, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInfo {
    #[schema(example = "fb_1")]
    pub id: String,

    #[schema(example = "proj_1")]
    pub project_id: String,

    #[schema(value_type = String, example = "bug")]
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,

    pub comment: String,

    pub created_at: DateTime<Utc>,

    /// 按添加顺序排列的标签
    pub labels: Vec<String>,

    /// 情感分析结果，未分析时为 `null`
    #[schema(value_type = Option<String>, example = "negative")]
    pub sentiment: Option<Sentiment>,
}

impl From<database::Feedback> for FeedbackInfo {
    fn from(feedback: database::Feedback) -> Self {
        Self {
            id: feedback.id,
            project_id: feedback.project_id,
            feedback_type: feedback.feedback_type,
            comment: feedback.comment,
            created_at: feedback.created_at,
            labels: feedback.labels,
            sentiment: feedback.sentiment,
        }
    }
}

/// 反馈列表的过滤条件
#[derive(Deserialize, Debug, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct FeedbackQuery {
    /// all / bug / feature / other，默认 all
    #[serde(rename = "type")]
    #[param(example = "bug")]
    pub feedback_type: Option<String>,
}

impl FeedbackQuery {
    pub fn filter(&self) -> Result<FeedbackFilter, ParseDomainError> {
        self.feedback_type.as_deref().map_or(Ok(FeedbackFilter::All), str::parse::<FeedbackFilter>)
    }
}

/// 情感分析请求体
///
/// 不传 `comment` 时使用已保存的反馈内容。
#[derive(Deserialize, Debug, ToSchema, Default)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

impl ActionInput for ClassifyRequest {
    const INVALID_MESSAGE: &'static str = "Invalid sentiment request.";
    const STRING_FIELDS: &'static [&'static str] = &["comment"];
}

/// 情感分析结果
#[derive(Deserialize, Debug, ToSchema, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub feedback_id: String,

    #[schema(value_type = String, example = "positive")]
    pub sentiment: Sentiment,
}
