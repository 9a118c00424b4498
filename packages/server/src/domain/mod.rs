//! ドメイン層
//!
//! チャットメッセージ、接続 ID、セッション状態と、
//! インフラ層が実装するインターフェース（Repository, MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod session;
pub mod value_object;

pub use entity::ChatMessage;
pub use error::{MessagePushError, RepositoryError, SessionStateError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::MessageRepository;
pub use session::SessionState;
pub use value_object::ConnectionId;

#[cfg(test)]
pub use repository::MockMessageRepository;
