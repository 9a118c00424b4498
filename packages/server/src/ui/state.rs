//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{GetHealthUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（履歴の読み込みと接続の登録）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（接続の登録解除）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（受信キューへの投入）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetHealthUseCase（ヘルスチェック）
    pub get_health_usecase: Arc<GetHealthUseCase>,
}
