//! UseCase: 退出処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    /// MessagePusher（Connection Registry の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を Registry から削除
    ///
    /// ブロードキャスト中に既に削除されていた場合は `false` を返す。
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        self.message_pusher.unregister_client(connection_id).await
    }
}
