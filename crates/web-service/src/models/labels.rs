use crate::models::extract::ActionInput;
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// 标签最大长度（字符数）
pub const MAX_LABEL_CHARS: usize = 20;

/// 标签长度必须在 [1, 20] 之间，空标签和过长标签给出不同提示
fn validate_label(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed("Label cannot be empty.")));
    }
    if len > MAX_LABEL_CHARS {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed("Label is too long.")));
    }
    Ok(())
}

/// 添加标签的请求体
///
/// `feedbackId` 通常来自URL路径，由路由函数填入。
#[derive(Deserialize, Debug, ToSchema, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabelCreate {
    #[schema(example = "ui")]
    #[serde(default)]
    #[validate(required(message = "Label cannot be empty."), custom(function = "validate_label"))]
    pub label: Option<String>,

    #[schema(example = "fb_1")]
    #[serde(default)]
    #[validate(required(message = "Feedback id is required."))]
    pub feedback_id: Option<String>,
}

impl ActionInput for LabelCreate {
    const INVALID_MESSAGE: &'static str = "Invalid label.";
    const STRING_FIELDS: &'static [&'static str] = &["label", "feedbackId"];
}

/// 校验通过后的标签参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLabel {
    pub feedback_id: String,
    pub label: String,
}

impl LabelCreate {
    pub fn validated(self) -> Result<ValidLabel, ValidationErrors> {
        self.validate()?;
        Ok(ValidLabel {
            feedback_id: self.feedback_id.unwrap_or_default(),
            label: self.label.unwrap_or_default(),
        })
    }
}
