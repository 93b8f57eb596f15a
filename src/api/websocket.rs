use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::time::interval;

use crate::analytics::aggregator::compute_statistics;
use crate::api::routes::AppState;

const PUSH_PERIOD: Duration = Duration::from_secs(2);
const PUSH_ENTRIES: usize = 5;

/// Axum handler that upgrades the HTTP connection to a WebSocket for
/// live feed streaming.
pub async fn live_feed_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_live_feed(socket, state))
}

/// Continuously push the newest feed entries to the connected client.
///
/// Every 2 s the head of each feed and a statistics snapshot over the live
/// activity list are serialised as a JSON object and sent as a text frame.
/// The loop terminates when the client disconnects (the send fails or a
/// Close frame is received).
async fn handle_live_feed(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Spawn a task that watches for client-initiated close.
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let recv_task = tokio::spawn(async move {
        // Drain incoming frames; we only care about Close.
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
        let _ = shutdown_tx.send(());
    });

    let mut tick = interval(PUSH_PERIOD);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let attacks = state.activity.entries();
                let stats = compute_statistics(&attacks);
                let logins = state.logins.entries();

                let payload = json!({
                    "server_status": state.server.status().to_string(),
                    "attacks": attacks.iter().take(PUSH_ENTRIES).collect::<Vec<_>>(),
                    "logins": logins.iter().take(PUSH_ENTRIES).collect::<Vec<_>>(),
                    "stats": {
                        "totalAttempts": stats.total_attempts,
                        "uniqueIPs": stats.unique_ips,
                        "successRate": stats.success_rate(),
                    },
                    "server_log_head": state.server.logs().first().cloned(),
                });

                let text = serde_json::to_string(&payload).unwrap_or_default();
                if sender.send(Message::Text(text.into())).await.is_err() {
                    // Client disconnected.
                    break;
                }
            }

            _ = &mut shutdown_rx => {
                // Client sent a close frame.
                break;
            }
        }
    }

    // Clean up the receiver task.
    recv_task.abort();
}
