//! UseCase 層のエラー定義

use thiserror::Error;

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// Broadcast Loop が停止しており、受信キューが閉じている
    #[error("inbound queue is closed")]
    QueueClosed,
}
