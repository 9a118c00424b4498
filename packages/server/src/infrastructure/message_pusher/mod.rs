//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket 接続ごとの送信チャンネルを管理する Connection Registry

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
