//! UseCase: メッセージ送信処理（producer 側）
//!
//! 各セッションは受信したメッセージを共有の受信キューに投入するだけで、
//! 永続化と配信は Broadcast Loop が一本化して行います。
//!
//! キューは有界で、満杯のときは投入側が待たされます。
//! これがシステム唯一のバックプレッシャー経路です（満杯時に破棄はしない）。

use tokio::sync::mpsc;

use crate::domain::ChatMessage;

use super::error::SendMessageError;

/// 受信キューの容量
pub const INBOUND_QUEUE_CAPACITY: usize = 1024;

/// 受信キューを作成
pub fn inbound_queue(
    capacity: usize,
) -> (mpsc::Sender<ChatMessage>, mpsc::Receiver<ChatMessage>) {
    mpsc::channel(capacity)
}

/// メッセージ送信のユースケース
#[derive(Clone)]
pub struct SendMessageUseCase {
    /// 受信キューの送信側
    queue: mpsc::Sender<ChatMessage>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(queue: mpsc::Sender<ChatMessage>) -> Self {
        Self { queue }
    }

    /// メッセージを受信キューに投入
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 投入成功（配信の成否は送信者に通知されない）
    /// * `Err(SendMessageError::QueueClosed)` - Broadcast Loop が停止している
    pub async fn execute(&self, message: ChatMessage) -> Result<(), SendMessageError> {
        self.queue
            .send(message)
            .await
            .map_err(|_| SendMessageError::QueueClosed)
    }
}
