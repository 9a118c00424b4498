//! ドメイン層のエラー定義

use thiserror::Error;

use super::SessionState;

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// ストアが利用できない（ロック破損、ブロッキングタスクの失敗など）
    #[error("message store unavailable: {0}")]
    Unavailable(String),

    /// クエリの実行に失敗した
    #[error("message store query failed: {0}")]
    Query(String),
}

/// MessagePusher 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 配信用のペイロードを生成できなかった
    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}

/// セッション状態遷移のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid session transition: {from:?} -> {to:?}")]
pub struct SessionStateError {
    pub from: SessionState,
    pub to: SessionState,
}
