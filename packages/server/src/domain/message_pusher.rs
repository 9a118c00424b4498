//! MessagePusher trait 定義
//!
//! 接続中のクライアント集合（Connection Registry）と、
//! そこへのメッセージ配信のインターフェースを定義します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, ConnectionId, MessagePushError};

/// 接続ごとの送信チャンネル
///
/// 受信側は接続ごとの writer タスクが保持する。
/// sender を drop するとチャンネルが閉じ、writer タスクは Close フレームを送って終了する。
pub type PusherChannel = mpsc::Sender<String>;

/// MessagePusher trait
///
/// ## 不変条件
///
/// - 登録・削除・ブロードキャストは単一の排他ロックの下で実行される
/// - ブロードキャスト中に送信に失敗した接続は、同じロック区間内で削除される
/// - 削除された接続に再び配信されることはない
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を削除（登録されていなければ `false`）
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// 登録中の全接続にメッセージを配信し、送信に失敗して削除した接続を返す
    ///
    /// 失敗した接続の削除はブロードキャストの失敗ではない。
    /// エラーになるのはメッセージのエンコード自体に失敗した場合のみ。
    async fn broadcast(
        &self,
        message: &ChatMessage,
    ) -> Result<Vec<ConnectionId>, MessagePushError>;

    /// 登録中の接続数
    async fn count_connections(&self) -> usize;
}
