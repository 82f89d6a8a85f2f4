//! WS281x LED strip emulator with WebSocket frame broadcast
//!
//! This crate emulates a ws281x device: instead of driving RGB LEDs it
//! publishes the array of color words representing the strip state to
//! every connected WebSocket viewer, so browser-based simulators can
//! render what the hardware would show. Code written against the real
//! driver API keeps its timing behavior because frame publication is
//! paced to the bus speed of the emulated hardware.
//!
//! # Example
//!
//! ```no_run
//! use ws2811_sim::{DeviceOptions, Hub, ServerConfig, Ws2811};
//!
//! #[tokio::main]
//! async fn main() -> ws2811_sim::Result<()> {
//!     let hub = Hub::spawn();
//!     tokio::spawn(ws2811_sim::serve(ServerConfig::default(), hub.clone()));
//!
//!     let mut device = Ws2811::new(&DeviceOptions::default(), hub);
//!     device.init()?;
//!     device.set_leds_sync(0, &[0xFF0000; 16]).await?;
//!     device.render().await?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;
pub mod hub;
pub mod server;

pub use device::{ChannelOptions, DeviceOptions, FramePayload, Ws2811};
pub use error::{Error, Result};
pub use hub::{Hub, HubHandle, PumpConfig, PumpError};
pub use server::{serve, serve_until, ServerConfig};
