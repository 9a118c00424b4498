//! InMemory Message Repository 実装
//!
//! Vec をインメモリ DB として使用します。プロセス終了で内容は失われます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRepository, RepositoryError};

/// インメモリ Message Repository 実装
#[derive(Default)]
pub struct InMemoryMessageRepository {
    /// 追記順に並んだメッセージ（index + 1 が ID）
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のメッセージを持った状態で作成
    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
        }
    }

    /// 保存済みの件数
    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: &ChatMessage) -> Result<i64, RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message.clone());
        Ok(messages.len() as i64)
    }

    async fn latest(&self, limit: usize) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }
}
