//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use realm_shared::{dto::ChatMessage, time::SystemClock};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{
    domain::compose_message, error::ClientError, formatter::MessageFormatter,
    history::SeenMessages, ui::redisplay_prompt,
};

/// Run one WebSocket client session.
///
/// Lines arrive on `input_rx` from the readline thread, which outlives the
/// session so that a reconnect keeps the same terminal input. `seen` carries
/// the printed tail across sessions so replayed history is not shown twice.
///
/// # Returns
///
/// * `Ok(())` - The user closed the input (Ctrl+C / Ctrl+D)
/// * `Err(ClientError::ConnectionError)` - Connecting failed
/// * `Err(ClientError::ConnectionLost)` - An established connection was lost
pub async fn run_client_session(
    url: &str,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    seen: &mut SeenMessages,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    print!("{}", MessageFormatter::format_welcome(username));
    redisplay_prompt(username);
    seen.begin_replay();

    let (mut write, mut read) = ws_stream.split();
    let clock = SystemClock;

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let formatted = match ChatMessage::from_json(text.as_str()) {
                        Ok(chat_msg) => {
                            if !seen.observe(&chat_msg) {
                                continue;
                            }
                            MessageFormatter::format_chat_message(&chat_msg, username)
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(username);
                }
                Some(Ok(Message::Binary(data))) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(username);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost);
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => match line {
                Some(line) => {
                    let json = match compose_message(username, &line, &clock).to_json() {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize message: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = write.send(Message::Text(json.into())).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                }
                None => {
                    // Input closed by the user
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                }
            },
        }
    }
}
