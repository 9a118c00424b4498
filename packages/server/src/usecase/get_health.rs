//! UseCase: ヘルスチェック

use std::sync::Arc;

use crate::domain::MessagePusher;

/// ヘルスチェックのユースケース
pub struct GetHealthUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetHealthUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 登録中の接続数を返す
    pub async fn execute(&self) -> usize {
        self.message_pusher.count_connections().await
    }
}
