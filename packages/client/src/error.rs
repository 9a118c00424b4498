//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was closed or broke
    #[error("Connection lost")]
    ConnectionLost,

    /// The saved username could not be read or written
    #[error("Profile error: {0}")]
    ProfileError(#[from] std::io::Error),
}
