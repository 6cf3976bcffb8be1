//! 内存存储
//!
//! 进程内的项目/反馈存储，数据不会落盘，进程重启后全部丢失。
//!
//! 每个修改操作在整个"读-改-写"过程中持有写锁，因此并发请求下
//! `add_label` 的"检查后追加"和 `set_sentiment` 的"查找后覆盖"不会丢失更新。

use crate::models::{Feedback, FeedbackCreate, LabelOutcome, Project, ProjectCreate};
use crate::repositories::traits::FeedbackStoreTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::Utc;
use shared_lib::{FeedbackFilter, Sentiment};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct StoreState {
    /// 最新的项目在最前面
    projects: VecDeque<Project>,
    /// 最新的反馈在最前面
    feedback: VecDeque<Feedback>,
}

/// 内存存储结构体
///
/// 克隆后共享同一份数据。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl MemoryStore {
    /// 创建空的存储实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用已有数据创建存储实例
    ///
    /// 传入的顺序即存储顺序（第一个元素视为最新）。
    pub fn with_data(projects: Vec<Project>, feedback: Vec<Feedback>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                projects: projects.into(),
                feedback: feedback.into(),
            })),
        }
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[async_trait::async_trait]
impl FeedbackStoreTrait for MemoryStore {
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<Project> {
        let mut state = self.state.write().await;

        // 项目ID和公钥都必须全局唯一
        let (id, project_key) = loop {
            let id = new_id("proj");
            let key = new_id("pk");
            if !state.projects.iter().any(|p| p.id == id || p.project_key == key) {
                break (id, key);
            }
        };

        let project = Project {
            id,
            name: project.name,
            created_at: Utc::now(),
            project_key,
        };
        state.projects.push_front(project.clone());

        debug!("📝 项目创建成功: {} ({})", project.name, project.id);
        Ok(project)
    }

    async fn find_project(&self, id: &str) -> DatabaseResult<Option<Project>> {
        let state = self.state.read().await;
        Ok(state.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn find_project_by_key(&self, project_key: &str) -> DatabaseResult<Option<Project>> {
        let state = self.state.read().await;
        Ok(state.projects.iter().find(|p| p.project_key == project_key).cloned())
    }

    async fn list_projects(&self) -> DatabaseResult<Vec<Project>> {
        let state = self.state.read().await;
        Ok(state.projects.iter().cloned().collect())
    }

    async fn create_feedback(&self, feedback: FeedbackCreate) -> DatabaseResult<Feedback> {
        let mut state = self.state.write().await;

        let id = loop {
            let id = new_id("fb");
            if !state.feedback.iter().any(|f| f.id == id) {
                break id;
            }
        };

        let feedback = Feedback {
            id,
            project_id: feedback.project_id,
            feedback_type: feedback.feedback_type,
            comment: feedback.comment,
            created_at: Utc::now(),
            labels: Vec::new(),
            sentiment: None,
        };
        state.feedback.push_front(feedback.clone());

        debug!("📝 反馈创建成功: {} -> 项目 {}", feedback.id, feedback.project_id);
        Ok(feedback)
    }

    async fn find_feedback(&self, id: &str) -> DatabaseResult<Option<Feedback>> {
        let state = self.state.read().await;
        Ok(state.feedback.iter().find(|f| f.id == id).cloned())
    }

    async fn filter_feedback_by_project(&self, project_id: &str) -> DatabaseResult<Vec<Feedback>> {
        let state = self.state.read().await;
        Ok(state
            .feedback
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn filter_feedback_by_type(&self, filter: FeedbackFilter) -> DatabaseResult<Vec<Feedback>> {
        let state = self.state.read().await;
        Ok(state
            .feedback
            .iter()
            .filter(|f| filter.matches(f.feedback_type))
            .cloned()
            .collect())
    }

    async fn add_label(&self, feedback_id: &str, label: &str) -> DatabaseResult<LabelOutcome> {
        let mut state = self.state.write().await;
        let feedback = state
            .feedback
            .iter_mut()
            .find(|f| f.id == feedback_id)
            .ok_or_else(|| DatabaseError::feedback_not_found(feedback_id))?;

        let outcome = feedback.add_label(label);
        debug!("🏷️ 反馈 {} 添加标签 {:?}: {:?}", feedback_id, label, outcome);
        Ok(outcome)
    }

    async fn set_sentiment(&self, feedback_id: &str, sentiment: Sentiment) -> DatabaseResult<Feedback> {
        let mut state = self.state.write().await;
        let feedback = state
            .feedback
            .iter_mut()
            .find(|f| f.id == feedback_id)
            .ok_or_else(|| DatabaseError::feedback_not_found(feedback_id))?;

        feedback.sentiment = Some(sentiment);
        debug!("🔄 反馈 {} 情感结果更新为 {}", feedback_id, sentiment);
        Ok(feedback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_lib::FeedbackType;
    use std::collections::HashSet;

    async fn add_feedback(store: &MemoryStore, project_id: &str, feedback_type: FeedbackType, comment: &str) -> Feedback {
        store
            .create_feedback(FeedbackCreate {
                project_id: project_id.to_string(),
                feedback_type,
                comment: comment.to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn project_ids_and_keys_are_unique() {
        let store = MemoryStore::new();
        let mut ids = HashSet::new();
        let mut keys = HashSet::new();

        for i in 0..50 {
            let project = store
                .create_project(ProjectCreate {
                    name: format!("Project {i}"),
                })
                .await
                .unwrap();
            assert!(project.id.starts_with("proj_"));
            assert!(project.project_key.starts_with("pk_"));
            assert!(ids.insert(project.id));
            assert!(keys.insert(project.project_key));
        }
    }

    #[tokio::test]
    async fn projects_are_listed_most_recent_first() {
        let store = MemoryStore::new();
        let first = store.create_project(ProjectCreate { name: "First".into() }).await.unwrap();
        let second = store.create_project(ProjectCreate { name: "Second".into() }).await.unwrap();

        let listed = store.list_projects().await.unwrap();
        assert_eq!(listed, vec![second, first]);
    }

    #[tokio::test]
    async fn find_project_by_id_and_key() {
        let store = MemoryStore::new();
        let project = store.create_project(ProjectCreate { name: "Lookup".into() }).await.unwrap();

        assert_eq!(store.find_project(&project.id).await.unwrap(), Some(project.clone()));
        assert_eq!(store.find_project_by_key(&project.project_key).await.unwrap(), Some(project));
        assert_eq!(store.find_project("proj_missing").await.unwrap(), None);
        assert_eq!(store.find_project_by_key("pk_missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn new_feedback_starts_without_labels_or_sentiment() {
        let store = MemoryStore::new();
        let feedback = add_feedback(&store, "proj_1", FeedbackType::Bug, "Button is broken on load").await;

        assert!(feedback.id.starts_with("fb_"));
        assert!(feedback.labels.is_empty());
        assert_eq!(feedback.sentiment, None);
        assert_eq!(store.find_feedback(&feedback.id).await.unwrap(), Some(feedback));
    }

    #[tokio::test]
    async fn feedback_for_project_is_most_recent_first() {
        let store = MemoryStore::new();
        let a = add_feedback(&store, "proj_1", FeedbackType::Bug, "First report here").await;
        let _other = add_feedback(&store, "proj_2", FeedbackType::Bug, "Other project report").await;
        let b = add_feedback(&store, "proj_1", FeedbackType::Feature, "Second report here").await;

        let listed = store.filter_feedback_by_project("proj_1").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);
    }

    #[tokio::test]
    async fn filter_by_type_preserves_store_order() {
        let store = MemoryStore::new();
        let bug1 = add_feedback(&store, "proj_1", FeedbackType::Bug, "First bug report").await;
        add_feedback(&store, "proj_1", FeedbackType::Feature, "A feature request").await;
        let bug2 = add_feedback(&store, "proj_1", FeedbackType::Bug, "Second bug report").await;
        add_feedback(&store, "proj_1", FeedbackType::Other, "Just saying hello").await;

        let bugs = store.filter_feedback_by_type(FeedbackType::Bug.into()).await.unwrap();
        assert_eq!(bugs, vec![bug2, bug1]);

        let all = store.filter_feedback_by_type(FeedbackFilter::All).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn add_label_twice_keeps_single_entry() {
        let store = MemoryStore::new();
        let feedback = add_feedback(&store, "proj_1", FeedbackType::Bug, "Layout is off on mobile").await;

        assert_eq!(store.add_label(&feedback.id, "ui").await.unwrap(), LabelOutcome::Added);
        assert_eq!(store.add_label(&feedback.id, "ui").await.unwrap(), LabelOutcome::AlreadyPresent);

        let stored = store.find_feedback(&feedback.id).await.unwrap().unwrap();
        assert_eq!(stored.labels, vec!["ui"]);
    }

    #[tokio::test]
    async fn mutating_missing_feedback_is_not_found() {
        let store = MemoryStore::new();

        let err = store.add_label("fb_missing", "ui").await.unwrap_err();
        assert_eq!(err, DatabaseError::feedback_not_found("fb_missing"));

        let err = store.set_sentiment("fb_missing", Sentiment::Positive).await.unwrap_err();
        assert_eq!(err, DatabaseError::feedback_not_found("fb_missing"));
    }

    #[tokio::test]
    async fn last_sentiment_wins() {
        let store = MemoryStore::new();
        let feedback = add_feedback(&store, "proj_1", FeedbackType::Other, "Checkout was smooth").await;

        store.set_sentiment(&feedback.id, Sentiment::Neutral).await.unwrap();
        let updated = store.set_sentiment(&feedback.id, Sentiment::Positive).await.unwrap();

        assert_eq!(updated.sentiment, Some(Sentiment::Positive));
        assert_eq!(updated.comment, feedback.comment);
    }

    #[tokio::test]
    async fn concurrent_label_adds_do_not_duplicate() {
        let store = MemoryStore::new();
        let feedback = add_feedback(&store, "proj_1", FeedbackType::Bug, "Race condition somewhere").await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                let id = feedback.id.clone();
                tokio::spawn(async move { store.add_label(&id, "race").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.find_feedback(&feedback.id).await.unwrap().unwrap();
        assert_eq!(stored.labels, vec!["race"]);
    }
}
