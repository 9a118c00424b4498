//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{error::ClientError, history::SeenMessages, session::run_client_session};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Counts consecutive failed attempts.
///
/// A session that connected and later dropped starts a fresh count, so only
/// `max_attempts` connection failures in a row end the client.
#[derive(Debug)]
struct ReconnectPolicy {
    max_attempts: u32,
    failures: u32,
}

impl ReconnectPolicy {
    fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            failures: 0,
        }
    }

    /// 1-based number of the next attempt
    fn next_attempt(&self) -> u32 {
        self.failures + 1
    }

    /// Record a failed session. Returns `false` once retries are exhausted.
    fn record_failure(&mut self, error: &ClientError) -> bool {
        if matches!(error, ClientError::ConnectionLost) {
            self.failures = 0;
            return true;
        }
        self.failures += 1;
        self.failures < self.max_attempts
    }
}

/// Run the WebSocket client with reconnection logic
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    let mut input_rx = spawn_readline(username.clone());
    let mut seen = SeenMessages::new();
    let mut policy = ReconnectPolicy::new(MAX_RECONNECT_ATTEMPTS);

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            policy.next_attempt(),
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &username, &mut input_rx, &mut seen).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);

                if !policy.record_failure(&e) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    policy.next_attempt(),
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}

/// Spawn a blocking thread for rustyline (synchronous readline).
///
/// The returned channel closes when the user presses Ctrl+C or Ctrl+D.
fn spawn_readline(username: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
