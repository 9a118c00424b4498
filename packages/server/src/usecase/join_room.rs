//! UseCase: 参加処理
//!
//! 新しい接続には、Registry に登録する前に直近の履歴を送信します。
//! 登録前に履歴を送り切ることで、履歴より先にライブ配信が届くことはありません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 履歴の取得（件数上限、昇順）
//! - 履歴取得失敗時の扱い（空の履歴として続行）
//! - 接続の登録

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, MessagePusher, MessageRepository, PusherChannel};

/// 参加時に送信する履歴の最大件数
pub const HISTORY_LIMIT: usize = 50;

/// 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（メッセージストアの抽象化）
    repository: Arc<dyn MessageRepository>,
    /// MessagePusher（Connection Registry の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    history_limit: usize,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self::with_history_limit(repository, message_pusher, HISTORY_LIMIT)
    }

    /// 履歴件数の上限を指定して作成
    pub fn with_history_limit(
        repository: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        history_limit: usize,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            history_limit,
        }
    }

    /// 新しい接続に送る履歴を古い順に取得
    ///
    /// ストアの読み込みに失敗した場合はログを残し、履歴なしで参加を続行する。
    pub async fn load_history(&self) -> Vec<ChatMessage> {
        match self.repository.latest(self.history_limit).await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Failed to load history, skipping replay: {}", e);
                Vec::new()
            }
        }
    }

    /// 履歴送信が終わった接続を Registry に登録
    pub async fn register(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessageRepository, RepositoryError},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryMessageRepository,
        },
    };
    use tokio::sync::mpsc;

    fn message(n: usize) -> ChatMessage {
        ChatMessage::new("alice", format!("message {}", n), format!("t{}", n))
    }

    #[tokio::test]
    async fn test_load_history_is_capped_and_ascending() {
        // テスト項目: 履歴は最大 50 件で、古い順に並ぶ
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::with_messages(
            (1..=70).map(message).collect(),
        ));
        let usecase = JoinRoomUseCase::new(repository, Arc::new(WebSocketMessagePusher::new()));

        // when (操作):
        let history = usecase.load_history().await;

        // then (期待する結果):
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], message(21));
        assert_eq!(history[HISTORY_LIMIT - 1], message(70));
    }

    #[tokio::test]
    async fn test_load_history_with_short_store() {
        // テスト項目: 上限未満の場合は全件が返される
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageRepository::with_messages(
            (1..=3).map(message).collect(),
        ));
        let usecase = JoinRoomUseCase::new(repository, Arc::new(WebSocketMessagePusher::new()));

        // when (操作):
        let history = usecase.load_history().await;

        // then (期待する結果):
        assert_eq!(history, vec![message(1), message(2), message(3)]);
    }

    #[tokio::test]
    async fn test_load_history_store_failure_yields_empty() {
        // テスト項目: ストアの読み込みに失敗しても空の履歴で続行する
        // given (前提条件):
        let mut repository = MockMessageRepository::new();
        repository
            .expect_latest()
            .withf(|limit| *limit == HISTORY_LIMIT)
            .returning(|_| Err(RepositoryError::Query("disk I/O error".to_string())));
        let usecase =
            JoinRoomUseCase::new(Arc::new(repository), Arc::new(WebSocketMessagePusher::new()));

        // when (操作):
        let history = usecase.load_history().await;

        // then (期待する結果):
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_register_adds_connection() {
        // テスト項目: 登録した接続が Registry に追加される
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase =
            JoinRoomUseCase::new(Arc::new(InMemoryMessageRepository::new()), pusher.clone());
        let (tx, _rx) = mpsc::channel(8);

        // when (操作):
        usecase.register(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert_eq!(pusher.count_connections().await, 1);
    }
}
