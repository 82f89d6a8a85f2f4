//! Viewer-facing WebSocket server
//!
//! Exposes the single handshake endpoint browser simulators connect to
//! and wires each accepted connection into the broadcast hub.

pub mod config;
pub mod ws;

pub use config::ServerConfig;
pub use ws::{router, serve, serve_until};
