//! 变更事件推送
//!
//! 通过 Server-Sent Events 推送 [`ChangeEvent`]，界面收到后重新拉取对应列表。

use crate::services::ChangeEvent;
use crate::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive};
use axum::response::Sse;
use std::convert::Infallible;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt as _};
use tracing::{debug, error, warn};

/// 转换为SSE事件
///
/// 订阅者处理太慢错过通知时发送 `lagged` 事件，客户端应该重新拉取全部数据。
fn to_sse_event(message: Result<ChangeEvent, BroadcastStreamRecvError>) -> Option<Result<Event, Infallible>> {
    match message {
        Ok(event) => match Event::default().event("change").json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(err) => {
                error!("❌ 变更事件序列化失败: {}", err);
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!("⚠️ SSE 订阅者落后，丢失 {} 条通知", skipped);
            Some(Ok(Event::default().event("lagged").data(skipped.to_string())))
        }
    }
}

/// 订阅变更事件
///
/// 每条事件的 `event` 为 `change`，`data` 为 [`ChangeEvent`] 的JSON。服务关闭时连接自动结束。
#[utoipa::path(get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Stream of change events", content_type = "text/event-stream", body = ChangeEvent)
    )
)]
pub async fn subscribe_events(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("📡 新的 SSE 订阅者");

    let mut shutdown_rx = state.shutdown_rx.clone();
    let stream = BroadcastStream::new(state.service.subscribe()).filter_map(to_sse_event);
    let stream = futures::StreamExt::take_until(stream, async move {
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
