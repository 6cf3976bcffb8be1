use crate::models::{Feedback, Project};
use crate::MemoryStore;
use chrono::{DateTime, TimeZone, Utc};
use shared_lib::{AppConfig, FeedbackType, Sentiment};
use std::sync::Arc;
use tracing::info;

/// 创建存储实例并按配置写入演示数据（一站式函数）
///
/// 存储实例在进程启动时创建一次，之后注入到各个服务中使用。
pub fn initialize_store(config: Arc<AppConfig>) -> MemoryStore {
    if !config.seed_demo_data {
        info!("🗄️ 内存存储创建成功（空数据）");
        return MemoryStore::new();
    }

    let projects = demo_projects();
    let feedback = demo_feedback();
    info!(
        "🗄️ 内存存储创建成功，已写入演示数据：{} 个项目，{} 条反馈",
        projects.len(),
        feedback.len()
    );

    MemoryStore::with_data(projects, feedback)
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "proj_1".to_string(),
            name: "PulseTrack App".to_string(),
            created_at: at(2023, 10, 26, 10, 0),
            project_key: "pk_live_xxxxxxxxxxxx1".to_string(),
        },
        Project {
            id: "proj_2".to_string(),
            name: "E-commerce Website".to_string(),
            created_at: at(2023, 11, 15, 14, 30),
            project_key: "pk_live_xxxxxxxxxxxx2".to_string(),
        },
    ]
}

fn demo_feedback() -> Vec<Feedback> {
    let item = |id: &str,
                project_id: &str,
                feedback_type: FeedbackType,
                comment: &str,
                created_at: DateTime<Utc>,
                labels: &[&str],
                sentiment: Option<Sentiment>| Feedback {
        id: id.to_string(),
        project_id: project_id.to_string(),
        feedback_type,
        comment: comment.to_string(),
        created_at,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        sentiment,
    };

    vec![
        item(
            "fb_1",
            "proj_1",
            FeedbackType::Feature,
            "It would be great to have a dark mode for the dashboard. My eyes would appreciate it!",
            at(2023, 10, 27, 11, 0),
            &["ui", "dark-mode"],
            Some(Sentiment::Positive),
        ),
        item(
            "fb_2",
            "proj_1",
            FeedbackType::Bug,
            "The 'Create Project' button doesn't work on Firefox. Nothing happens when I click it.",
            at(2023, 10, 28, 9, 20),
            &["bug", "firefox"],
            Some(Sentiment::Negative),
        ),
        item(
            "fb_3",
            "proj_2",
            FeedbackType::Other,
            "The checkout process is very smooth and easy to understand. Good job!",
            at(2023, 11, 20, 18, 5),
            &["checkout", "ux"],
            Some(Sentiment::Positive),
        ),
        item(
            "fb_4",
            "proj_1",
            FeedbackType::Feature,
            "Can we get email notifications when new feedback is submitted?",
            at(2023, 10, 29, 16, 45),
            &["notifications"],
            Some(Sentiment::Neutral),
        ),
        item(
            "fb_5",
            "proj_2",
            FeedbackType::Bug,
            "Product images are not loading on the main page. I just see spinners.",
            at(2023, 11, 21, 12, 0),
            &[],
            None,
        ),
    ]
}
