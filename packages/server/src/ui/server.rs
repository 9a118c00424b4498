//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{GetHealthUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase};

use super::{
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// The broadcast loop is spawned separately; the server only hands inbound
/// messages to it through `SendMessageUseCase`.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     leave_room_usecase,
///     send_message_usecase,
///     get_health_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// GetHealthUseCase（ヘルスチェックのユースケース）
    get_health_usecase: Arc<GetHealthUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_health_usecase: Arc<GetHealthUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            send_message_usecase,
            get_health_usecase,
        }
    }

    /// Build the router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            send_message_usecase: self.send_message_usecase,
            get_health_usecase: self.get_health_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Realm chat server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
