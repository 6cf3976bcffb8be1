use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// 字段名 -> 错误信息列表
///
/// 字段名使用请求体中的名字（camelCase），同一字段的错误信息按校验顺序排列。
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// 封装符合json-api的单个返回对象
///
/// 具体参考：<https://jsonapi.org>
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Reply<T> {
    pub data: T,
}

/// 修改操作的处理结果分类，决定HTTP状态码，不参与序列化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Ok,
    /// 参数校验失败
    Invalid,
    /// 引用的项目/反馈不存在
    NotFound,
    /// 外部能力（情感分析）调用失败
    Upstream,
    /// 其他意外错误
    Internal,
}

impl ActionStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionStatus::Ok => StatusCode::OK,
            ActionStatus::Invalid => StatusCode::BAD_REQUEST,
            ActionStatus::NotFound => StatusCode::NOT_FOUND,
            ActionStatus::Upstream => StatusCode::BAD_GATEWAY,
            ActionStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 所有修改操作统一的返回格式
///
/// ```json
/// { "message": "...", "fieldErrors": { "comment": ["..."] }, "data": { ... } }
/// ```
///
/// - 成功时 `data` 有值，`fieldErrors` 不出现
/// - 校验失败时 `fieldErrors` 有值，`data` 不出现
/// - 其他失败只有 `message`
#[derive(Deserialize, Debug, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReply<T> {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip)]
    pub status: ActionStatus,
}

impl<T> ActionReply<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            field_errors: None,
            data: Some(data),
            status: ActionStatus::Ok,
        }
    }

    pub fn invalid(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        Self::invalid_fields(message, field_errors(errors))
    }

    pub fn invalid_fields(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: message.into(),
            field_errors: Some(errors),
            data: None,
            status: ActionStatus::Invalid,
        }
    }

    pub fn failure(message: impl Into<String>, status: ActionStatus) -> Self {
        Self {
            message: message.into(),
            field_errors: None,
            data: None,
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Ok
    }
}

/// Tell axum how to convert `ActionReply` into a response.
impl<T: Serialize> IntoResponse for ActionReply<T> {
    fn into_response(self) -> Response {
        (self.status.status_code(), Json(self)).into_response()
    }
}

/// 把 [`ValidationErrors`] 转换为 `字段 -> 错误信息` 的结构
///
/// 没有自定义信息的校验规则使用规则代码（例如 `length`）作为信息。
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                .collect();
            (wire_field_name(&field), messages)
        })
        .collect()
}

/// 结构体字段名转换为请求体中的字段名
///
/// 反馈类型在请求体中叫 `type`，结构体里是 `feedback_type`；其余字段做 snake_case -> camelCase 转换。
fn wire_field_name(field: &str) -> String {
    if field == "feedback_type" {
        return "type".to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(wire_field_name("project_id"), "projectId");
        assert_eq!(wire_field_name("feedbackId"), "feedbackId");
        assert_eq!(wire_field_name("comment"), "comment");
        assert_eq!(wire_field_name("feedback_type"), "type");
    }

    #[test]
    fn field_errors_use_messages_or_codes() {
        let mut errors = ValidationErrors::new();
        errors.add("project_id", ValidationError::new("required").with_message(Cow::Borrowed("Project id is required.")));
        errors.add("comment", ValidationError::new("length"));

        let map = field_errors(&errors);
        assert_eq!(map["projectId"], vec!["Project id is required."]);
        assert_eq!(map["comment"], vec!["length"]);
    }

    #[test]
    fn success_reply_omits_field_errors() {
        let reply = ActionReply::success("done", 42);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "done", "data": 42 }));
        assert_eq!(reply.status.status_code(), StatusCode::OK);
    }

    #[test]
    fn failure_reply_has_only_message() {
        let reply: ActionReply<()> = ActionReply::failure("nope", ActionStatus::NotFound);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "nope" }));
        assert_eq!(reply.status.status_code(), StatusCode::NOT_FOUND);
    }
}
