//! 变更通知
//!
//! 修改操作成功后广播"某个集合已变化"，界面（或其他订阅者）收到后重新拉取数据。
//! 通知只是刷新提示，不携带实体数据；订阅者处理不过来时丢失的通知不影响数据正确性。

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use utoipa::ToSchema;

/// 集合变更事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChangeEvent {
    /// 项目列表有变化
    ProjectsChanged,

    /// 指定项目的反馈列表有变化
    FeedbackChanged {
        #[serde(rename = "projectId")]
        project_id: String,
    },
}

/// 变更通知广播器
///
/// 克隆后共享同一个广播通道。
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// 创建广播器，`capacity` 为每个订阅者最多缓存的未读事件数
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// 广播事件，没有订阅者时直接丢弃
    pub fn notify(&self, event: ChangeEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!("📣 变更通知已发送给 {} 个订阅者", receivers),
            Err(broadcast::error::SendError(event)) => debug!("No subscribers for {:?}", event),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_events_in_order() {
        let notifier = ChangeNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.notify(ChangeEvent::ProjectsChanged);
        notifier.notify(ChangeEvent::FeedbackChanged {
            project_id: "proj_1".into(),
        });

        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::ProjectsChanged);
        assert_eq!(
            rx.recv().await.unwrap(),
            ChangeEvent::FeedbackChanged {
                project_id: "proj_1".into()
            }
        );
    }

    #[test]
    fn notify_without_subscribers_is_fine() {
        let notifier = ChangeNotifier::new(8);
        assert_eq!(notifier.subscriber_count(), 0);
        notifier.notify(ChangeEvent::ProjectsChanged);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(ChangeEvent::FeedbackChanged {
            project_id: "proj_1".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "type": "feedbackChanged", "projectId": "proj_1" }));
    }
}
