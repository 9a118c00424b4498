//! WebSocket を使った MessagePusher 実装（Connection Registry）
//!
//! ## 責務
//!
//! - 接続ごとの送信チャンネル（`PusherChannel`）を管理
//! - メッセージを一度だけ JSON にエンコードし、全接続に配信
//! - 送信に失敗した接続を配信と同じロック区間内で削除
//!
//! ## 設計ノート
//!
//! WebSocket への実際の書き込みは UI 層の writer タスクが行います。
//! ここでの「送信」は `try_send` によるチャンネルへの投入で、ブロックしません。
//! そのため、ロックを保持したままネットワーク I/O を待つことはありません。
//!
//! 送信失敗は次の 2 つ:
//! - `Closed`: writer タスクが終了している（ソケットへの書き込みに失敗した）
//! - `Full`: クライアントが遅く、送信バッファが溢れた
//!
//! 削除された接続の sender は drop され、writer タスクは Close フレームを送って終了します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ChatMessage, ConnectionId, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::dto::websocket as dto,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = tokio::sync::mpsc::channel(256);
/// pusher.register_client(connection_id, tx).await;
///
/// let evicted = pusher.broadcast(&message).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 登録中の接続
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!(%connection_id, "Connection registered ({} total)", clients.len());
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        let removed = clients.remove(connection_id).is_some();
        if removed {
            tracing::debug!(
                connection_id = %connection_id,
                "Connection unregistered ({} remaining)",
                clients.len()
            );
        }
        removed
    }

    async fn broadcast(
        &self,
        message: &ChatMessage,
    ) -> Result<Vec<ConnectionId>, MessagePushError> {
        // 全受信者で共有するペイロードを一度だけ生成
        let payload = dto::ChatMessage::from(message)
            .to_json()
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))?;

        let mut clients = self.clients.lock().await;
        let mut evicted = Vec::new();

        clients.retain(|connection_id, sender| match sender.try_send(payload.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(%connection_id, "Outbound buffer full, evicting slow connection");
                evicted.push(*connection_id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!(%connection_id, "Connection closed, evicting");
                evicted.push(*connection_id);
                false
            }
        });

        tracing::debug!(
            "Broadcasted message to {} connection(s), evicted {}",
            clients.len(),
            evicted.len()
        );

        Ok(evicted)
    }

    async fn count_connections(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 登録・削除
    // - broadcast: 全接続への配信、ペイロードの形式
    // - 送信失敗（Closed / Full）時の削除と、削除後に配信されないこと
    // ========================================

    fn hello() -> ChatMessage {
        ChatMessage::new("a", "hi", "t1")
    }

    const HELLO_JSON: &str = r#"{"username":"a","content":"hi","timestamp":"t1"}"#;

    #[tokio::test]
    async fn test_register_and_unregister() {
        // テスト項目: 登録した接続が数えられ、削除すると減る
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::channel(8);
        let id = ConnectionId::generate();
        pusher.register_client(id, tx).await;

        // when (操作):
        let before = pusher.count_connections().await;
        let removed = pusher.unregister_client(&id).await;
        let removed_again = pusher.unregister_client(&id).await;

        // then (期待する結果):
        assert_eq!(before, 1);
        assert!(removed);
        assert!(!removed_again);
        assert_eq!(pusher.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_connection() {
        // テスト項目: 登録中の全接続に同じ JSON が配信される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        pusher.register_client(ConnectionId::generate(), tx1).await;
        pusher.register_client(ConnectionId::generate(), tx2).await;

        // when (操作):
        let evicted = pusher.broadcast(&hello()).await.unwrap();

        // then (期待する結果):
        assert!(evicted.is_empty());
        assert_eq!(rx1.recv().await.as_deref(), Some(HELLO_JSON));
        assert_eq!(rx2.recv().await.as_deref(), Some(HELLO_JSON));
    }

    #[tokio::test]
    async fn test_broadcast_with_no_connections() {
        // テスト項目: 接続がなくてもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(&hello()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_broadcast_evicts_closed_connection() {
        // テスト項目: 受信側が閉じた接続は削除され、以後配信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alive_tx, mut alive_rx) = mpsc::channel(8);
        let (dead_tx, dead_rx) = mpsc::channel(8);
        let alive = ConnectionId::generate();
        let dead = ConnectionId::generate();
        pusher.register_client(alive, alive_tx).await;
        pusher.register_client(dead, dead_tx).await;
        drop(dead_rx);

        // when (操作):
        let first = pusher.broadcast(&hello()).await.unwrap();
        let second = pusher.broadcast(&hello()).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, vec![dead]);
        assert!(second.is_empty());
        assert_eq!(pusher.count_connections().await, 1);
        assert!(!pusher.unregister_client(&dead).await);
        assert_eq!(alive_rx.recv().await.as_deref(), Some(HELLO_JSON));
        assert_eq!(alive_rx.recv().await.as_deref(), Some(HELLO_JSON));
    }

    #[tokio::test]
    async fn test_broadcast_evicts_slow_connection() {
        // テスト項目: 送信バッファが溢れた接続は削除され、チャンネルが閉じられる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (slow_tx, mut slow_rx) = mpsc::channel(1);
        let slow = ConnectionId::generate();
        pusher.register_client(slow, slow_tx).await;

        // when (操作): バッファ 1 に対して 2 件配信
        let first = pusher.broadcast(&hello()).await.unwrap();
        let second = pusher.broadcast(&hello()).await.unwrap();

        // then (期待する結果):
        assert!(first.is_empty());
        assert_eq!(second, vec![slow]);
        assert_eq!(slow_rx.recv().await.as_deref(), Some(HELLO_JSON));
        // sender が drop されたのでチャンネルは閉じている
        assert_eq!(slow_rx.recv().await, None);
    }
}
