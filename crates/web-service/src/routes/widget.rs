//! 挂件接口
//!
//! 嵌入脚本运行在用户的网站上，只知道项目公钥。

use crate::models::common::ActionReply;
use crate::models::extract::ActionJson;
use crate::models::feedback::{FeedbackInfo, WidgetFeedbackSubmit};
use crate::AppState;
use axum::extract::{Path, State};
use tracing::debug;

/// 挂件提交反馈
#[utoipa::path(post,
    path = "/widget/{project_key}/feedback",
    tag = "widget",
    params(("project_key" = String, Path, description = "项目公钥")),
    request_body = WidgetFeedbackSubmit,
    responses(
        (status = 200, description = "Feedback submitted", body = ActionReply<FeedbackInfo>),
        (status = 400, description = "Validation failed", body = ActionReply<FeedbackInfo>),
        (status = 404, description = "Unknown project key", body = ActionReply<FeedbackInfo>)
    )
)]
pub async fn submit_widget_feedback(
    State(state): State<AppState>,
    Path(project_key): Path<String>,
    ActionJson(feedback): ActionJson<WidgetFeedbackSubmit>,
) -> ActionReply<FeedbackInfo> {
    debug!("Widget feedback via {}", project_key);
    state.service.submit_widget_feedback(&project_key, feedback).await
}
