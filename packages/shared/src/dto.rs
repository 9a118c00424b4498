//! WebSocket wire format.
//!
//! Both directions use the same JSON object with exactly three string fields.
//! History replay sends the same objects one frame at a time, oldest first.

use serde::{Deserialize, Serialize};

/// Chat message as it travels over the WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub content: String,
    /// Sender-supplied display label, passed through verbatim
    pub timestamp: String,
}

impl ChatMessage {
    /// Decode a text frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Decode a binary frame holding UTF-8 JSON
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encode into the wire representation
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_message() {
        // テスト項目: 3 つの文字列フィールドを持つ JSON がデコードできる
        // given (前提条件):
        let text = r#"{"username":"a","content":"hi","timestamp":"t1"}"#;

        // when (操作):
        let result = ChatMessage::from_json(text);

        // then (期待する結果):
        let msg = result.unwrap();
        assert_eq!(msg.username, "a");
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.timestamp, "t1");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        // テスト項目: 未知のフィールドは無視される
        // given (前提条件):
        let text = r#"{"username":"a","content":"hi","timestamp":"t1","color":"red"}"#;

        // when (操作):
        let result = ChatMessage::from_json(text);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        // テスト項目: 必須フィールドが欠けている場合はエラー
        // given (前提条件):
        let text = r#"{"username":"a","content":"hi"}"#;

        // when (操作):
        let result = ChatMessage::from_json(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_non_string_field() {
        // テスト項目: 文字列以外の型はエラー
        // given (前提条件):
        let text = r#"{"username":"a","content":"hi","timestamp":1700000000}"#;

        // when (操作):
        let result = ChatMessage::from_json(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        // テスト項目: JSON でないテキストはエラー
        // given (前提条件):
        let text = "hello there";

        // when (操作):
        let result = ChatMessage::from_json(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_binary_frame() {
        // テスト項目: バイナリフレームの UTF-8 JSON もデコードできる
        // given (前提条件):
        let bytes = br#"{"username":"b","content":"yo","timestamp":"12:00"}"#;

        // when (操作):
        let result = ChatMessage::from_json_bytes(bytes);

        // then (期待する結果):
        assert_eq!(result.unwrap().username, "b");
    }

    #[test]
    fn test_encode_uses_field_order() {
        // テスト項目: エンコード結果が username, content, timestamp の順になる
        // given (前提条件):
        let msg = ChatMessage {
            username: "a".to_string(),
            content: "hi".to_string(),
            timestamp: "t1".to_string(),
        };

        // when (操作):
        let json = msg.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"username":"a","content":"hi","timestamp":"t1"}"#);
    }
}
