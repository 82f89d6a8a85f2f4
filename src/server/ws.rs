//! WebSocket handshake endpoint and per-connection wiring
//!
//! The only viewer-facing surface is one upgrade endpoint. After the
//! handshake all traffic is server-to-client frame pushes plus liveness
//! control frames; nothing is requested by the viewer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::error::Result;
use crate::hub::{pump, FrameSink, HubHandle, PumpConfig, PumpError, PumpId};

use super::config::ServerConfig;

/// Shared state for the upgrade handler
#[derive(Clone)]
struct WsState {
    hub: HubHandle,
    pump: PumpConfig,
    next_pump_id: Arc<AtomicU64>,
}

/// Build the router exposing the handshake endpoint
pub fn router(config: &ServerConfig, hub: HubHandle) -> Router {
    let state = WsState {
        hub,
        pump: config.pump.clone(),
        next_pump_id: Arc::new(AtomicU64::new(1)),
    };

    Router::new()
        .route(&config.endpoint, get(handle_upgrade))
        .with_state(state)
}

/// Run the frame broadcast server
///
/// Blocks until the server fails; use [`serve_until`] for graceful
/// shutdown.
pub async fn serve(config: ServerConfig, hub: HubHandle) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        endpoint = %config.endpoint,
        "Frame broadcast server listening"
    );

    let app = router(&config, hub);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run the frame broadcast server until `shutdown` completes
pub async fn serve_until<F>(config: ServerConfig, hub: HubHandle, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        endpoint = %config.endpoint,
        "Frame broadcast server listening"
    );

    let app = router(&config, hub);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Frame broadcast server stopped");
    Ok(())
}

/// Handle a WebSocket upgrade request
///
/// A failed upgrade aborts only this registration attempt; the hub and
/// other viewers are unaffected.
async fn handle_upgrade(ws: WebSocketUpgrade, State(state): State<WsState>) -> Response {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "Can't upgrade connection"))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Wire one accepted viewer connection into the hub
///
/// Registers a bounded outbound queue, spawns the writer loop and runs
/// the reader loop inline. Whichever side fails first unregisters the
/// pump; unregistration is idempotent.
async fn handle_socket(socket: WebSocket, state: WsState) {
    let id = state.next_pump_id.fetch_add(1, Ordering::Relaxed);
    let (queue_tx, queue_rx) = mpsc::channel(state.pump.queue_capacity);
    state.hub.register(id, queue_tx);
    tracing::debug!(pump = id, "Viewer connected");

    let (sink, stream) = socket.split();

    let writer_hub = state.hub.clone();
    let writer_config = state.pump.clone();
    tokio::spawn(async move {
        if let Err(e) = pump::run_writer(WsSink { sink }, queue_rx, writer_config).await {
            tracing::debug!(pump = id, error = %e, "Writer stopped");
        }
        writer_hub.unregister(id);
    });

    run_reader(stream, id, state.pump.clone()).await;
    state.hub.unregister(id);
    tracing::debug!(pump = id, "Viewer disconnected");
}

/// Consume inbound control frames and enforce the liveness deadline
///
/// Any inbound traffic (pongs included; axum answers client pings
/// itself) resets the deadline. Close frame, stream end, transport
/// error or deadline expiry all end the connection.
async fn run_reader(mut stream: SplitStream<WebSocket>, id: PumpId, config: PumpConfig) {
    loop {
        match timeout(config.pong_timeout, stream.next()).await {
            Err(_) => {
                tracing::debug!(
                    pump = id,
                    error = %PumpError::ReadDeadlineExceeded,
                    "Reader stopped"
                );
                return;
            }
            Ok(None) => return,
            Ok(Some(Err(e))) => {
                tracing::debug!(pump = id, error = %e, "Reader stopped");
                return;
            }
            Ok(Some(Ok(Message::Close(_)))) => return,
            Ok(Some(Ok(_))) => {}
        }
    }
}

/// Outbound half of a viewer's WebSocket
struct WsSink {
    sink: SplitSink<WebSocket, Message>,
}

impl FrameSink for WsSink {
    async fn send_frame(&mut self, payload: Bytes) -> std::result::Result<(), PumpError> {
        // Frames are JSON, sent as text messages like the hardware
        // emulators browsers already speak.
        let text = String::from_utf8(payload.to_vec())
            .map_err(|_| PumpError::Transport("frame payload is not valid UTF-8".into()))?;
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(transport_error)
    }

    async fn send_ping(&mut self) -> std::result::Result<(), PumpError> {
        self.sink
            .send(Message::Ping(Bytes::new()))
            .await
            .map_err(transport_error)
    }

    async fn send_close(&mut self) -> std::result::Result<(), PumpError> {
        self.sink
            .send(Message::Close(None))
            .await
            .map_err(transport_error)
    }
}

fn transport_error(e: axum::Error) -> PumpError {
    PumpError::Transport(e.to_string())
}

#[cfg(test)]
mod tests {
    use crate::hub::Hub;

    use super::*;

    #[tokio::test]
    async fn test_router_builds_with_custom_endpoint() {
        let hub = Hub::spawn();
        let config = ServerConfig::default().endpoint("/leds");

        let _router = router(&config, hub);
    }
}
