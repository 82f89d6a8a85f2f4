//! Broadcast hub for viewer connections
//!
//! The hub fans frame payloads out to every connected viewer without
//! ever blocking the producer. Each viewer gets a connection pump with
//! a bounded outbound queue; the hub's single coordination loop owns
//! the registry of those queues.
//!
//! # Architecture
//!
//! ```text
//!   [Producer]                         HubHandle events
//!   device.render() ──► broadcast ──────────┐
//!                                           ▼
//!                                ┌─────────────────────┐
//!   [Transport] ──► register ──► │ Hub coordination    │
//!               ──► unregister ─►│ loop (single task)  │
//!                                │ pumps: HashMap<Id,  │
//!                                │   mpsc::Sender>     │
//!                                └──────────┬──────────┘
//!                              try_send     │    try_send
//!                        ┌──────────────────┼──────────────────┐
//!                        ▼                  ▼                  ▼
//!                 [Pump writer]      [Pump writer]      [Pump writer]
//!                 coalesce+send      coalesce+send      coalesce+send
//!                        │                  │                  │
//!                        └──► WebSocket     └──► WebSocket     └──► WebSocket
//! ```
//!
//! # Zero-Copy Design
//!
//! Frame payloads travel as `bytes::Bytes`, so fan-out to N pumps clones
//! a reference-counted handle, never the frame data itself.

pub mod config;
pub mod error;
pub mod pump;
pub mod store;

pub use config::PumpConfig;
pub use error::PumpError;
pub use pump::FrameSink;
pub use store::{Hub, HubHandle, PumpId};
