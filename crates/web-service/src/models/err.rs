use crate::models::common::{ActionReply, ActionStatus};
use axum::response::{IntoResponse, Response};
use color_eyre::eyre::Error;
use database::DatabaseError;
use sentiment_gateway::GatewayError;
use shared_lib::ParseDomainError;
use thiserror::Error;
use validator::ValidationErrors;

/// 情感分析失败时返回给用户的统一提示，具体原因只记录在日志里
pub const CLASSIFICATION_FAILED: &str = "Failed to analyze sentiment.";

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 查询参数无法解析（例如未知的反馈类型过滤条件）
    #[error(transparent)]
    InvalidInput(#[from] ParseDomainError),

    /// 存储层错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 情感分析网关错误
    #[error(transparent)]
    ClassificationError(#[from] GatewayError),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

impl AppError {
    /// 转换为统一的返回格式
    ///
    /// `invalid_message` 只在校验失败时使用，其余错误使用各自的提示。
    pub fn into_reply<T>(self, invalid_message: &str) -> ActionReply<T> {
        match self {
            AppError::ValidationFailed(err) => ActionReply::invalid(invalid_message, &err),
            AppError::InvalidInput(err) => ActionReply::failure(format!("Invalid input: {err}"), ActionStatus::Invalid),
            AppError::RepositoryError(err) => match err {
                DatabaseError::NotFound { .. } => ActionReply::failure(format!("Resource not found: {err}"), ActionStatus::NotFound),
            },
            AppError::ClassificationError(_) => ActionReply::failure(CLASSIFICATION_FAILED, ActionStatus::Upstream),
            AppError::InternalError(err) => ActionReply::failure(format!("Something went wrong: {err}"), ActionStatus::Internal),
        }
    }
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_reply::<()>("Validate failed.").into_response()
    }
}
