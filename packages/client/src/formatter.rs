//! Message formatting utilities for client display.

use realm_shared::dto::ChatMessage;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `message` - The received message
    /// * `current_username` - The current user's name (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted line such as `[12:30] alice: hello`
    pub fn format_chat_message(message: &ChatMessage, current_username: &str) -> String {
        let me_suffix = if message.username == current_username {
            " (me)"
        } else {
            ""
        };
        format!(
            "\r[{}] {}{}: {}\n",
            message.timestamp, message.username, me_suffix, message.content
        )
    }

    /// Format the banner shown after connecting
    pub fn format_welcome(username: &str) -> String {
        format!(
            "\n============================================================\n\
             You are '{}'. Type messages and press Enter to send.\n\
             Press Ctrl+C or Ctrl+D to exit.\n\
             ============================================================\n",
            username
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\r← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\r← Received: {}\n", text)
    }
}
