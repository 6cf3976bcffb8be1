//! 修改操作的请求体提取器
//!
//! axum 自带的 [`axum::Json`] 在字段类型不对时直接返回纯文本的422，
//! 这里改为返回统一的 [`ActionReply`]：类型错误的字段放在 `fieldErrors` 中，HTTP状态码为400。
//!
//! 空请求体按 `{}` 处理，也不检查 `Content-Type`，挂件可以用 `text/plain` 提交以避免跨域预检。

use crate::models::common::{ActionReply, ActionStatus, FieldErrors};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const EXPECTED_STRING: &str = "Expected a string.";

/// 可以用 [`ActionJson`] 提取的请求体
pub trait ActionInput: DeserializeOwned {
    /// 校验失败时的提示信息
    const INVALID_MESSAGE: &'static str;

    /// 请求体中的字符串字段（使用请求体中的字段名）
    const STRING_FIELDS: &'static [&'static str];
}

/// 修改操作使用的JSON提取器，失败时返回 [`ActionReply`]
#[derive(Debug)]
pub struct ActionJson<T>(pub T);

impl<S, T> FromRequest<S> for ActionJson<T>
where
    S: Send + Sync,
    T: ActionInput,
{
    type Rejection = ActionReply<()>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ActionReply::failure(rejection.body_text(), ActionStatus::Invalid))?;

        parse_body(&bytes).map(ActionJson)
    }
}

/// 解析请求体
///
/// 字符串字段传了其他类型的值（数字、对象等）时整体失败，`null` 视为没有传。
pub fn parse_body<T: ActionInput>(bytes: &[u8]) -> Result<T, ActionReply<()>> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(bytes)
            .map_err(|err| ActionReply::failure(format!("Invalid JSON body: {err}"), ActionStatus::Invalid))?
    };

    let Value::Object(fields) = value else {
        return Err(ActionReply::failure("Request body must be a JSON object.", ActionStatus::Invalid));
    };

    let errors: FieldErrors = T::STRING_FIELDS
        .iter()
        .filter(|name| matches!(fields.get(**name), Some(v) if !v.is_string() && !v.is_null()))
        .map(|name| (name.to_string(), vec![EXPECTED_STRING.to_string()]))
        .collect();
    if !errors.is_empty() {
        return Err(ActionReply::invalid_fields(T::INVALID_MESSAGE, errors));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|err| ActionReply::invalid_fields(T::INVALID_MESSAGE, FieldErrors::from([("body".to_string(), vec![err.to_string()])])))
}
