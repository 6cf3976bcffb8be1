//! 反馈服务
//!
//! 所有修改操作都在这里实现，并统一返回 [`ActionReply`]：
//! 校验 -> 修改存储 -> 发送变更通知 -> 返回结果。

use crate::models::common::ActionReply;
use crate::models::err::AppError;
use crate::models::extract::ActionInput;
use crate::models::feedback::{ClassifyRequest, FeedbackInfo, FeedbackSubmit, SentimentResult, WidgetFeedbackSubmit};
use crate::models::labels::LabelCreate;
use crate::models::projects::{ProjectCreate, ProjectInfo, SnippetInfo};
use crate::services::notify::{ChangeEvent, ChangeNotifier};
use database::{DatabaseError, Feedback, FeedbackCreate, FeedbackStoreTrait, LabelOutcome, Project};
use sentiment_gateway::SentimentClassifierTrait;
use shared_lib::{embed_snippet, FeedbackFilter};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// 反馈服务
///
/// 存储和情感分类器都以 trait 对象注入，进程内只创建一次，由 [`crate::AppState`] 共享。
pub struct FeedbackService {
    store: Arc<dyn FeedbackStoreTrait>,
    classifier: Arc<dyn SentimentClassifierTrait>,
    notifier: ChangeNotifier,
    widget_host: String,
}

impl FeedbackService {
    pub fn new(
        store: Arc<dyn FeedbackStoreTrait>,
        classifier: Arc<dyn SentimentClassifierTrait>,
        notifier: ChangeNotifier,
        widget_host: impl Into<String>,
    ) -> Self {
        Self {
            store,
            classifier,
            notifier,
            widget_host: widget_host.into(),
        }
    }

    /// 订阅变更通知
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    /// 创建项目
    ///
    /// 校验失败时不会修改存储，也不会发送通知。
    pub async fn create_project(&self, input: ProjectCreate) -> ActionReply<ProjectInfo> {
        match self.try_create_project(input).await {
            Ok(project) => {
                let message = format!("Project \"{}\" created successfully.", project.name);
                ActionReply::success(message, project.into())
            }
            Err(err) => err.into_reply(ProjectCreate::INVALID_MESSAGE),
        }
    }

    async fn try_create_project(&self, input: ProjectCreate) -> Result<Project, AppError> {
        let create = input.validated()?;
        let project = self.store.create_project(create).await?;

        info!("📁 项目已创建: {} ({})", project.name, project.id);
        self.notifier.notify(ChangeEvent::ProjectsChanged);
        Ok(project)
    }

    /// 提交反馈
    ///
    /// 引用的项目必须存在，否则返回未找到。
    pub async fn submit_feedback(&self, input: FeedbackSubmit) -> ActionReply<FeedbackInfo> {
        match self.try_submit_feedback(input).await {
            Ok(feedback) => ActionReply::success("Feedback submitted successfully!", feedback.into()),
            Err(err) => err.into_reply(FeedbackSubmit::INVALID_MESSAGE),
        }
    }

    /// 挂件提交反馈，项目通过项目公钥确定
    ///
    /// 先校验请求体再查找项目，请求体不合法时总是返回字段错误。
    pub async fn submit_widget_feedback(&self, project_key: &str, input: WidgetFeedbackSubmit) -> ActionReply<FeedbackInfo> {
        match self.try_submit_widget_feedback(project_key, input).await {
            Ok(feedback) => ActionReply::success("Feedback submitted successfully!", feedback.into()),
            Err(err) => err.into_reply(WidgetFeedbackSubmit::INVALID_MESSAGE),
        }
    }

    async fn try_submit_feedback(&self, input: FeedbackSubmit) -> Result<Feedback, AppError> {
        let create = input.validated()?;
        self.require_project(&create.project_id).await?;
        self.store_feedback(create).await
    }

    async fn try_submit_widget_feedback(&self, project_key: &str, input: WidgetFeedbackSubmit) -> Result<Feedback, AppError> {
        // 项目ID在找到项目后填入
        let mut create = input.for_project(String::new()).validated()?;

        let project = self
            .store
            .find_project_by_key(project_key)
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(project_key))?;

        debug!("Widget feedback for project {} via key {}", project.id, project_key);
        create.project_id = project.id;
        self.store_feedback(create).await
    }

    async fn store_feedback(&self, create: FeedbackCreate) -> Result<Feedback, AppError> {
        let feedback = self.store.create_feedback(create).await?;

        info!("💬 收到反馈 {} [{}] 项目: {}", feedback.id, feedback.feedback_type, feedback.project_id);
        self.notifier.notify(ChangeEvent::FeedbackChanged {
            project_id: feedback.project_id.clone(),
        });
        Ok(feedback)
    }

    /// 给反馈添加标签
    ///
    /// 标签已存在时同样返回成功，不会产生重复标签。
    pub async fn add_label(&self, input: LabelCreate) -> ActionReply<FeedbackInfo> {
        match self.try_add_label(input).await {
            Ok((label, feedback)) => ActionReply::success(format!("Added label \"{label}\""), feedback.into()),
            Err(err) => err.into_reply(LabelCreate::INVALID_MESSAGE),
        }
    }

    async fn try_add_label(&self, input: LabelCreate) -> Result<(String, Feedback), AppError> {
        let valid = input.validated()?;

        match self.store.add_label(&valid.feedback_id, &valid.label).await? {
            LabelOutcome::Added => {
                debug!("🏷️ 反馈 {} 添加标签 {}", valid.feedback_id, valid.label);
            }
            LabelOutcome::AlreadyPresent => {
                debug!("Label {} already present on {}", valid.label, valid.feedback_id);
            }
        }

        let feedback = self.require_feedback(&valid.feedback_id).await?;
        self.notifier.notify(ChangeEvent::FeedbackChanged {
            project_id: feedback.project_id.clone(),
        });
        Ok((valid.label, feedback))
    }

    /// 对反馈做情感分析并保存结果
    ///
    /// 调用分类器期间不持有存储锁；分类失败时保留原有结果。
    /// 请求中没有 `comment` 时使用已保存的反馈内容。
    pub async fn classify_feedback(&self, feedback_id: &str, input: ClassifyRequest) -> ActionReply<SentimentResult> {
        match self.try_classify_feedback(feedback_id, input).await {
            Ok(result) => ActionReply::success(format!("Sentiment analyzed: {}", result.sentiment), result),
            Err(err) => err.into_reply(ClassifyRequest::INVALID_MESSAGE),
        }
    }

    async fn try_classify_feedback(&self, feedback_id: &str, input: ClassifyRequest) -> Result<SentimentResult, AppError> {
        let feedback = self.require_feedback(feedback_id).await?;

        let text = input
            .comment
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(feedback.comment);

        let sentiment = self.classifier.classify(&text).await.inspect_err(|err| {
            warn!("⚠️ 反馈 {} 情感分析失败: {}", feedback_id, err);
        })?;

        let updated = self.store.set_sentiment(feedback_id, sentiment).await?;

        info!("🧠 反馈 {} 情感分析结果: {}", updated.id, sentiment);
        self.notifier.notify(ChangeEvent::FeedbackChanged {
            project_id: updated.project_id,
        });
        Ok(SentimentResult {
            feedback_id: updated.id,
            sentiment,
        })
    }

    /// 所有项目，最新在前
    pub async fn list_projects(&self) -> Result<Vec<ProjectInfo>, AppError> {
        let projects = self.store.list_projects().await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    pub async fn get_project(&self, project_id: &str) -> Result<ProjectInfo, AppError> {
        Ok(self.require_project(project_id).await?.into())
    }

    /// 项目的嵌入脚本
    pub async fn project_snippet(&self, project_id: &str) -> Result<SnippetInfo, AppError> {
        let project = self.require_project(project_id).await?;
        Ok(SnippetInfo {
            snippet: embed_snippet(&self.widget_host, &project.project_key),
            project_id: project.id,
            project_key: project.project_key,
        })
    }

    /// 项目下的反馈，可按类型过滤
    pub async fn project_feedback(&self, project_id: &str, filter: FeedbackFilter) -> Result<Vec<FeedbackInfo>, AppError> {
        self.require_project(project_id).await?;

        let feedback = self.store.filter_feedback_by_project(project_id).await?;
        Ok(feedback
            .into_iter()
            .filter(|f| filter.matches(f.feedback_type))
            .map(Into::into)
            .collect())
    }

    /// 所有项目的反馈，可按类型过滤
    pub async fn list_feedback(&self, filter: FeedbackFilter) -> Result<Vec<FeedbackInfo>, AppError> {
        let feedback = self.store.filter_feedback_by_type(filter).await?;
        Ok(feedback.into_iter().map(Into::into).collect())
    }

    pub async fn get_feedback(&self, feedback_id: &str) -> Result<FeedbackInfo, AppError> {
        Ok(self.require_feedback(feedback_id).await?.into())
    }

    async fn require_project(&self, project_id: &str) -> Result<Project, AppError> {
        self.store
            .find_project(project_id)
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(project_id).into())
    }

    async fn require_feedback(&self, feedback_id: &str) -> Result<Feedback, AppError> {
        self.store
            .find_feedback(feedback_id)
            .await?
            .ok_or_else(|| DatabaseError::feedback_not_found(feedback_id).into())
    }
}
