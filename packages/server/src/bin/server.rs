//! Realm chat server.
//!
//! Relays chat messages between every connected WebSocket client and keeps a
//! durable history in SQLite.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin realm-server
//! cargo run --bin realm-server -- --host 127.0.0.1 --port 3000 --database ./data/realm.db
//! ```

use std::sync::Arc;

use clap::Parser;
use realm_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::SqliteMessageRepository},
    ui::Server,
    usecase::{
        BroadcastLoop, GetHealthUseCase, INBOUND_QUEUE_CAPACITY, JoinRoomUseCase,
        LeaveRoomUseCase, SendMessageUseCase, inbound_queue,
    },
};
use realm_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "realm-server")]
#[command(about = "Single-room WebSocket chat relay with persistent history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// SQLite database file (":memory:" keeps history only for the process lifetime)
    #[arg(short = 'd', long, default_value = "./realm.db")]
    database: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Inbound queue and broadcast loop
    // 4. UseCases
    // 5. Server

    // 1. Open the message store. Failing here is fatal.
    let repository = match SqliteMessageRepository::open(&args.database) {
        Ok(repository) => Arc::new(repository),
        Err(e) => {
            tracing::error!("Failed to open message store '{}': {}", args.database, e);
            std::process::exit(1);
        }
    };

    // 2. Create MessagePusher (connection registry)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Start the single consumer of the inbound queue
    let (queue_tx, queue_rx) = inbound_queue(INBOUND_QUEUE_CAPACITY);
    BroadcastLoop::new(repository.clone(), message_pusher.clone(), queue_rx).spawn();

    // 4. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(message_pusher.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(queue_tx));
    let get_health_usecase = Arc::new(GetHealthUseCase::new(message_pusher.clone()));

    // 5. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        send_message_usecase,
        get_health_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
