//! WebSocket session handler.
//!
//! Each connection goes through `Connecting -> Replaying -> Active -> Closed`:
//!
//! 1. Replay recent history directly on the socket, oldest first
//! 2. Register the connection so the broadcast loop starts delivering to it
//! 3. Pump inbound frames into the shared inbound queue until the socket closes
//! 4. Unregister and close

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, SessionState},
    infrastructure::dto::websocket::ChatMessage,
    ui::state::AppState,
    usecase::SendMessageUseCase,
};

/// Capacity of the per-connection outbound buffer.
/// A connection whose buffer is full during a broadcast is evicted.
const OUTBOUND_BUFFER: usize = 256;

/// Upper bound for a single socket write
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!("WebSocket handshake rejected: {}", rejection);
            return rejection.into_response();
        }
    };

    let connection_id = ConnectionId::generate();
    ws.on_failed_upgrade(move |e| {
        tracing::warn!(%connection_id, "WebSocket upgrade failed: {}", e);
    })
    .on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Record a session state transition
fn advance(session: &mut SessionState, next: SessionState, connection_id: ConnectionId) {
    let from = *session;
    match session.transition(next) {
        Ok(()) => tracing::debug!(%connection_id, "Session {:?} -> {:?}", from, next),
        Err(e) => tracing::warn!(%connection_id, "{}", e),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let mut session = SessionState::default();
    tracing::info!(%connection_id, "Client connected");

    let (mut sender, receiver) = socket.split();

    // Send history before registering, so no live message can overtake it
    advance(&mut session, SessionState::Replaying, connection_id);
    let history = state.join_room_usecase.load_history().await;
    let replayed = history.len();
    for message in history {
        let json = match ChatMessage::from(message).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(%connection_id, "Failed to encode history message: {}", e);
                continue;
            }
        };
        if let Err(e) = sender.send(Message::Text(json.into())).await {
            tracing::warn!(%connection_id, "Failed to replay history: {}", e);
            advance(&mut session, SessionState::Closed, connection_id);
            return;
        }
    }
    tracing::debug!(%connection_id, "Replayed {} history message(s)", replayed);

    let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
    state.join_room_usecase.register(connection_id, tx).await;
    advance(&mut session, SessionState::Active, connection_id);

    let mut send_task = pusher_loop(rx, sender, connection_id);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.send_message_usecase.clone(),
        connection_id,
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state.leave_room_usecase.execute(&connection_id).await {
        tracing::debug!(%connection_id, "Connection removed from registry");
    }
    advance(&mut session, SessionState::Closed, connection_id);
    tracing::info!(%connection_id, "Client disconnected");
}

/// Spawns the writer task for one connection.
///
/// Messages handed over by the broadcast loop are written to the socket in
/// channel order. When the channel closes (the connection was evicted) a Close
/// frame is sent. A failed or timed-out write ends the task, which closes the
/// channel so the next broadcast evicts the connection.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    connection_id: ConnectionId,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let write = sender.send(Message::Text(msg.into()));
            match tokio::time::timeout(WRITE_TIMEOUT, write).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(%connection_id, "WebSocket write failed: {}", e);
                    return;
                }
                Err(_) => {
                    tracing::warn!(%connection_id, "WebSocket write timed out");
                    return;
                }
            }
        }
        tracing::debug!(%connection_id, "Outbound channel closed, closing socket");
        let _ = sender.send(Message::Close(None)).await;
    })
}

/// Reads frames until the socket closes, forwarding decoded messages to the
/// inbound queue. Malformed frames are logged and dropped.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    send_message_usecase: Arc<SendMessageUseCase>,
    connection_id: ConnectionId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(%connection_id, "WebSocket read error: {}", e);
                break;
            }
        };

        let decoded = match msg {
            Message::Text(text) => ChatMessage::from_json(text.as_str()),
            Message::Binary(data) => ChatMessage::from_json_bytes(&data),
            Message::Close(_) => {
                tracing::info!(%connection_id, "Client requested close");
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        let chat_msg = match decoded {
            Ok(chat_msg) => chat_msg,
            Err(e) => {
                tracing::warn!(%connection_id, "Dropping malformed frame: {}", e);
                continue;
            }
        };

        tracing::debug!(
            %connection_id,
            "Received message from '{}' ({} bytes)",
            chat_msg.username,
            chat_msg.content.len()
        );

        if let Err(e) = send_message_usecase.execute(chat_msg.into()).await {
            tracing::error!(%connection_id, "Failed to enqueue message: {}", e);
            break;
        }
    }
}
