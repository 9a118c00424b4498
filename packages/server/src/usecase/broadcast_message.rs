//! UseCase: Broadcast Loop（受信キューの唯一の consumer）
//!
//! 受信キューからメッセージを一件ずつ取り出し、
//!
//! 1. メッセージストアに追記する（失敗してもログのみで配信は続行）
//! 2. 登録中の全接続に配信する（送信に失敗した接続は削除）
//!
//! を、次のメッセージに進む前に完了させます。
//! consumer が一つだけなので、全クライアントが同じ順序でメッセージを受け取り、
//! メッセージストアへの書き込みにロックは不要です。
//! 配信処理を複数タスクに並列化すると順序が崩れるため、行ってはいけません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 永続化してから配信されること
//! - 永続化に失敗しても配信されること
//! - 送信に失敗した接続が削除されること
//! - 複数メッセージがキューの順序どおりに配信されること

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{ChatMessage, ConnectionId, MessagePusher, MessageRepository};

/// 1 件のメッセージを処理した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// ストアが採番した ID（永続化に失敗した場合は `None`）
    pub persisted_id: Option<i64>,
    /// 送信に失敗して Registry から削除された接続
    pub evicted: Vec<ConnectionId>,
}

/// Broadcast Loop
pub struct BroadcastLoop {
    /// Repository（メッセージストアの抽象化）
    repository: Arc<dyn MessageRepository>,
    /// MessagePusher（Connection Registry の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 受信キューの受信側
    queue: mpsc::Receiver<ChatMessage>,
}

impl BroadcastLoop {
    /// 新しい BroadcastLoop を作成
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        queue: mpsc::Receiver<ChatMessage>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            queue,
        }
    }

    /// 専用タスクとして起動
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// キューが閉じるまで（全ての送信側が drop されるまで）メッセージを処理し続ける
    pub async fn run(mut self) {
        tracing::info!("Broadcast loop started");
        while let Some(message) = self.queue.recv().await {
            self.process(message).await;
        }
        tracing::info!("Inbound queue closed, broadcast loop stopped");
    }

    /// 1 件のメッセージを永続化してから配信
    pub async fn process(&self, message: ChatMessage) -> BroadcastOutcome {
        let persisted_id = match self.repository.append(&message).await {
            Ok(id) => Some(id),
            Err(e) => {
                // 永続化の失敗は致命的ではない。ライブ配信は行うが、以後の履歴には現れない
                tracing::error!("Failed to persist message from '{}': {}", message.username, e);
                None
            }
        };

        let evicted = match self.message_pusher.broadcast(&message).await {
            Ok(evicted) => evicted,
            Err(e) => {
                tracing::error!("Failed to broadcast message: {}", e);
                Vec::new()
            }
        };

        if !evicted.is_empty() {
            tracing::info!("Evicted {} connection(s) after send failure", evicted.len());
        }

        BroadcastOutcome {
            persisted_id,
            evicted,
        }
    }
}
