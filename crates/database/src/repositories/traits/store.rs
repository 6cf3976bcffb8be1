//! 反馈存储 trait 定义
//!
//! 定义项目与反馈存储的抽象接口

use crate::models::{Feedback, FeedbackCreate, LabelOutcome, Project, ProjectCreate};
use crate::DatabaseResult;
use shared_lib::{FeedbackFilter, Sentiment};

/// 反馈存储trait定义
///
/// 支持：
/// - 项目创建、查询、列表
/// - 反馈创建、查询、按项目/类型过滤
/// - 反馈标签与情感结果的修改
///
/// 新建的实体总是放在集合最前面，所有列表接口都按"最新在前"的顺序返回。
#[async_trait::async_trait]
pub trait FeedbackStoreTrait: Send + Sync + 'static {
    /// 创建新项目
    ///
    /// 生成新的项目ID和项目公钥，创建时间为当前时间。校验通过后不会失败。
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<Project>;

    /// 根据 ID 查询项目
    async fn find_project(&self, id: &str) -> DatabaseResult<Option<Project>>;

    /// 根据项目公钥查询项目
    async fn find_project_by_key(&self, project_key: &str) -> DatabaseResult<Option<Project>>;

    /// 所有项目，最新在前
    async fn list_projects(&self) -> DatabaseResult<Vec<Project>>;

    /// 创建新反馈
    ///
    /// 标签为空，情感结果未设置。存储层不检查项目是否存在。
    async fn create_feedback(&self, feedback: FeedbackCreate) -> DatabaseResult<Feedback>;

    /// 根据 ID 查询反馈
    async fn find_feedback(&self, id: &str) -> DatabaseResult<Option<Feedback>>;

    /// 指定项目的全部反馈，保持存储顺序
    async fn filter_feedback_by_project(&self, project_id: &str) -> DatabaseResult<Vec<Feedback>>;

    /// 按类型过滤全部反馈，[`FeedbackFilter::All`] 返回全部
    async fn filter_feedback_by_type(&self, filter: FeedbackFilter) -> DatabaseResult<Vec<Feedback>>;

    /// 给反馈添加标签
    ///
    /// 标签已存在时返回 [`LabelOutcome::AlreadyPresent`]；反馈不存在时返回
    /// [`crate::DatabaseError::NotFound`]。
    async fn add_label(&self, feedback_id: &str, label: &str) -> DatabaseResult<LabelOutcome>;

    /// 覆盖反馈的情感结果，返回修改后的反馈
    async fn set_sentiment(&self, feedback_id: &str, sentiment: Sentiment) -> DatabaseResult<Feedback>;
}
