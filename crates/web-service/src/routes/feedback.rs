//! 反馈相关接口
//!

use crate::models::common::{ActionReply, Reply};
use crate::models::err::AppError;
use crate::models::extract::ActionJson;
use crate::models::feedback::{ClassifyRequest, FeedbackInfo, FeedbackQuery, FeedbackSubmit, SentimentResult};
use crate::models::labels::LabelCreate;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;

/// 查询所有反馈
///
/// 支持按类型过滤：`?type=bug`，不传或 `all` 返回全部。
#[utoipa::path(get,
    path = "/feedback",
    tag = "feedback",
    params(FeedbackQuery),
    responses(
        (status = 200, description = "Feedback, newest first", body = Reply<Vec<FeedbackInfo>>),
        (status = 400, description = "Unknown feedback type filter")
    )
)]
pub async fn list_feedback(State(state): State<AppState>, Query(query): Query<FeedbackQuery>) -> Result<Json<Reply<Vec<FeedbackInfo>>>, AppError> {
    let feedback = state.service.list_feedback(query.filter()?).await?;
    Ok(Json(Reply { data: feedback }))
}

/// 提交反馈
#[utoipa::path(post,
    path = "/feedback",
    tag = "feedback",
    request_body = FeedbackSubmit,
    responses(
        (status = 200, description = "Feedback submitted", body = ActionReply<FeedbackInfo>),
        (status = 400, description = "Validation failed", body = ActionReply<FeedbackInfo>),
        (status = 404, description = "Project not found", body = ActionReply<FeedbackInfo>)
    )
)]
pub async fn submit_feedback(State(state): State<AppState>, ActionJson(feedback): ActionJson<FeedbackSubmit>) -> ActionReply<FeedbackInfo> {
    debug!("Submitting feedback {:#?}", feedback);
    state.service.submit_feedback(feedback).await
}

/// 查询指定反馈
#[utoipa::path(get,
    path = "/feedback/{id}",
    tag = "feedback",
    params(("id" = String, Path, description = "反馈ID")),
    responses(
        (status = 200, description = "Feedback", body = Reply<FeedbackInfo>),
        (status = 404, description = "Feedback not found")
    )
)]
pub async fn get_feedback(State(state): State<AppState>, Path(feedback_id): Path<String>) -> Result<Json<Reply<FeedbackInfo>>, AppError> {
    let feedback = state.service.get_feedback(&feedback_id).await?;
    Ok(Json(Reply { data: feedback }))
}

/// 给反馈添加标签
///
/// 反馈ID来自路径，请求体中的 `feedbackId` 会被忽略。重复添加同一个标签不会报错。
#[utoipa::path(post,
    path = "/feedback/{id}/labels",
    tag = "feedback",
    params(("id" = String, Path, description = "反馈ID")),
    request_body = LabelCreate,
    responses(
        (status = 200, description = "Label added", body = ActionReply<FeedbackInfo>),
        (status = 400, description = "Invalid label", body = ActionReply<FeedbackInfo>),
        (status = 404, description = "Feedback not found", body = ActionReply<FeedbackInfo>)
    )
)]
pub async fn add_label(
    State(state): State<AppState>,
    Path(feedback_id): Path<String>,
    ActionJson(mut label): ActionJson<LabelCreate>,
) -> ActionReply<FeedbackInfo> {
    label.feedback_id = Some(feedback_id);
    debug!("Adding label {:?}", label);
    state.service.add_label(label).await
}

/// 对反馈做情感分析
///
/// 请求体可以为空（或 `{}`），此时分析已保存的反馈内容。分析失败时原有结果保持不变，可以重试。
#[utoipa::path(post,
    path = "/feedback/{id}/sentiment",
    tag = "feedback",
    params(("id" = String, Path, description = "反馈ID")),
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Sentiment stored", body = ActionReply<SentimentResult>),
        (status = 400, description = "Malformed request body", body = ActionReply<SentimentResult>),
        (status = 404, description = "Feedback not found", body = ActionReply<SentimentResult>),
        (status = 502, description = "Sentiment analysis failed", body = ActionReply<SentimentResult>)
    )
)]
pub async fn classify_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<String>,
    ActionJson(request): ActionJson<ClassifyRequest>,
) -> ActionReply<SentimentResult> {
    debug!("Classifying feedback {}", feedback_id);
    state.service.classify_feedback(&feedback_id, request).await
}
