//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::routes::events::__path_subscribe_events;
use crate::routes::events::subscribe_events;
use crate::routes::feedback::__path_add_label;
use crate::routes::feedback::__path_classify_feedback;
use crate::routes::feedback::__path_get_feedback;
use crate::routes::feedback::__path_list_feedback;
use crate::routes::feedback::__path_submit_feedback;
use crate::routes::feedback::{add_label, classify_feedback, get_feedback, list_feedback, submit_feedback};
use crate::routes::projects::__path_create_project;
use crate::routes::projects::__path_get_project;
use crate::routes::projects::__path_list_projects;
use crate::routes::projects::__path_project_feedback;
use crate::routes::projects::__path_project_snippet;
use crate::routes::projects::{create_project, get_project, list_projects, project_feedback, project_snippet};
use crate::routes::widget::__path_submit_widget_feedback;
use crate::routes::widget::submit_widget_feedback;
use crate::AppState;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod events;
pub mod feedback;
pub mod projects;
pub mod widget;

/// 健康检查结果
#[derive(Serialize, ToSchema)]
pub struct Health {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// 健康检查
#[utoipa::path(get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = Health)
    )
)]
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 导出当前App的所有路由
///
/// ## 参数定义
/// - state: 共享数据，参考 [`AppState`] 定义。
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，同一个宏里面的接口必须是同一个路径下的不同http方法。
/// 不能这样定义：
///
/// ```rust,ignore
/// routes!(get_project, list_projects)
/// ```
///
/// 需要拆开定义
///
/// ```rust,ignore
/// routes!(list_projects, create_project)
/// .routes!(get_project)
/// ```
///
fn routers(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_projects, create_project))
        .routes(routes!(get_project))
        .routes(routes!(project_snippet))
        .routes(routes!(project_feedback))
        .routes(routes!(list_feedback, submit_feedback))
        .routes(routes!(get_feedback))
        .routes(routes!(add_label))
        .routes(routes!(classify_feedback))
        .routes(routes!(submit_widget_feedback))
        .routes(routes!(subscribe_events))
        .routes(routes!(health))
        .with_state(state)
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档
/// - 生成App路由
/// - 使用Scalar作为最终在线文档格式
/// - 请求日志与跨域（挂件运行在用户自己的网站上）
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: AppState) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "pulsetrack", description = r#"
PulseTrack 反馈收集服务：

- 项目与嵌入脚本
- 反馈收集（bug / feature / other）
- 标签与情感分析
- 变更事件推送（SSE）
            "#)
        ),
    )]
    struct ApiDoc;

    // 使用`utoipa_axum`提供的OpenApiRouter来创建路由。
    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router
        .merge(Scalar::with_url("/docs", api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
