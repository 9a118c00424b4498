//! ドメインエンティティ

/// チャットメッセージ
///
/// 生成後は変更されない値。`timestamp` は送信者が付けた表示用ラベルで、
/// サーバー内部の順序付けには使わない（順序は受信順と永続化 ID で決まる）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub username: String,
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(
        username: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}
