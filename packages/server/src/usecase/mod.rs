//! UseCase 層
//!
//! - `join_room`: 履歴の読み込みと接続の登録
//! - `leave_room`: 接続の登録解除
//! - `send_message`: 受信したメッセージを受信キューに投入（producer 側）
//! - `broadcast_message`: 受信キューの唯一の consumer（永続化してから配信）
//! - `get_health`: ヘルスチェック用の状態取得

pub mod broadcast_message;
pub mod error;
pub mod get_health;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

pub use broadcast_message::{BroadcastLoop, BroadcastOutcome};
pub use error::SendMessageError;
pub use get_health::GetHealthUseCase;
pub use join_room::{HISTORY_LIMIT, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use send_message::{INBOUND_QUEUE_CAPACITY, SendMessageUseCase, inbound_queue};
