//! Repository trait 定義
//!
//! ドメイン層が必要とするメッセージストアのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{ChatMessage, RepositoryError};

/// Message Repository trait
///
/// 追記専用のメッセージストア。更新・削除は行わない。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを追記し、サーバーが採番した ID を返す
    ///
    /// ID は単調増加し、履歴の並び順にのみ使用される。
    async fn append(&self, message: &ChatMessage) -> Result<i64, RepositoryError>;

    /// 直近 `limit` 件のメッセージを古い順に取得
    async fn latest(&self, limit: usize) -> Result<Vec<ChatMessage>, RepositoryError>;
}
