use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use tokio::sync::mpsc;

use crate::{models::OutboundMessage, services::ChannelManager};

use super::AppState;

/// Upgrades to the live preference channel
pub async fn preference_channel(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_session(socket, state.channels))
}

/// Drives one connection until either side closes it
///
/// Inbound frames go to the channel manager; queued pushes are serialized and
/// written back. The session is discarded however the loop ends.
async fn serve_session(mut socket: WebSocket, channels: ChannelManager) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let session_id = channels.open(tx).await;

    loop {
        tokio::select! {
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    channels.handle_message(session_id, &text).await;
                }
                Some(Ok(Message::Binary(bytes))) => {
                    channels
                        .handle_message(session_id, &String::from_utf8_lossy(&bytes))
                        .await;
                }
                // Ping/pong replies are handled by axum
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::warn!(session_id = %session_id, error = %e, "Channel transport error");
                    break;
                }
            },
            outbound = rx.recv() => {
                let Some(message) = outbound else { break };

                let payload = match serde_json::to_string(&message) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!(session_id = %session_id, error = %e, "Failed to encode push");
                        continue;
                    }
                };

                if let Err(e) = socket.send(Message::Text(payload)).await {
                    tracing::debug!(session_id = %session_id, error = %e, "Push failed; closing channel");
                    break;
                }
            }
        }
    }

    channels.close(session_id).await;
}
