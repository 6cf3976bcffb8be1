//! 项目相关接口
//!

use crate::models::common::{ActionReply, Reply};
use crate::models::err::AppError;
use crate::models::extract::ActionJson;
use crate::models::feedback::{FeedbackInfo, FeedbackQuery};
use crate::models::projects::{ProjectCreate, ProjectInfo, SnippetInfo};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;

/// 查询所有项目
///
/// 最新创建的项目排在最前面。
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects, newest first", body = Reply<Vec<ProjectInfo>>)
    ),
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Reply<Vec<ProjectInfo>>>, AppError> {
    let projects = state.service.list_projects().await?;
    Ok(Json(Reply { data: projects }))
}

/// 创建项目
///
/// 根据用户输入参数创建项目，生成项目ID和项目公钥。
///
/// ## 返回值
///
/// 返回 [`ActionReply`]，HTTP状态码由处理结果决定：
/// - 200: 创建成功，`data` 为新项目
/// - 400: 参数校验失败（包括字段类型不对），`fieldErrors` 给出每个字段的错误信息
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectCreate,
    responses(
        (status = 200, description = "Project created", body = ActionReply<ProjectInfo>),
        (status = 400, description = "Validation failed", body = ActionReply<ProjectInfo>)
    )
)]
pub async fn create_project(State(state): State<AppState>, ActionJson(project): ActionJson<ProjectCreate>) -> ActionReply<ProjectInfo> {
    debug!("Creating project {:#?}", project);
    state.service.create_project(project).await
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project", body = Reply<ProjectInfo>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(State(state): State<AppState>, Path(project_id): Path<String>) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("Getting project id {}", project_id);
    let project = state.service.get_project(&project_id).await?;
    Ok(Json(Reply { data: project }))
}

/// 获取项目的嵌入脚本
#[utoipa::path(get,
    path = "/projects/{id}/snippet",
    tag = "projects",
    params(("id" = String, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Embed snippet", body = Reply<SnippetInfo>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn project_snippet(State(state): State<AppState>, Path(project_id): Path<String>) -> Result<Json<Reply<SnippetInfo>>, AppError> {
    let snippet = state.service.project_snippet(&project_id).await?;
    Ok(Json(Reply { data: snippet }))
}

/// 查询项目下的反馈
///
/// 支持按类型过滤，`type` 不传时返回全部。
#[utoipa::path(get,
    path = "/projects/{id}/feedback",
    tag = "projects",
    params(("id" = String, Path, description = "项目ID"), FeedbackQuery),
    responses(
        (status = 200, description = "Project feedback, newest first", body = Reply<Vec<FeedbackInfo>>),
        (status = 400, description = "Unknown feedback type filter"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn project_feedback(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<Reply<Vec<FeedbackInfo>>>, AppError> {
    let filter = query.filter()?;
    debug!("🔍 查询项目 {} 的反馈, 过滤条件 {:?}", project_id, filter);

    let feedback = state.service.project_feedback(&project_id, filter).await?;
    Ok(Json(Reply { data: feedback }))
}
