//! Terminal chat client for the Realm chat relay.
//!
//! Connects to the server, prints the recent history followed by live
//! messages, and sends each line typed at the prompt.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin realm-client -- --username Alice
//! cargo run --bin realm-client -- -u ws://192.168.1.10:8080/ws
//! ```

use clap::Parser;
use realm_client::{UsernameStore, default_username};
use realm_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "realm-client")]
#[command(about = "Terminal client for the Realm single-room chat", long_about = None)]
struct Args {
    /// Display name attached to your messages (defaults to a saved Anon-NNNN)
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let username = args.username.unwrap_or_else(saved_username);

    if let Err(e) = realm_client::run_client(args.url, username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

/// Load the saved anonymous name, creating it on first launch
fn saved_username() -> String {
    let Some(store) = UsernameStore::in_config_dir() else {
        tracing::warn!("No config directory found, using a one-off username");
        return default_username();
    };
    store.load_or_create().unwrap_or_else(|e| {
        tracing::warn!("{}, using a one-off username", e);
        default_username()
    })
}
