//! Emulated WS281x device
//!
//! Everything the producer touches lives here: the configuration
//! options mirroring the hardware driver, the per-channel frame buffer,
//! the pacing controller that reproduces the bus transmission window,
//! and the [`Ws2811`] device tying them together.

pub mod buffer;
pub mod frame;
pub mod options;
pub mod pacing;
pub mod ws2811;

pub use buffer::FrameBuffer;
pub use frame::FramePayload;
pub use options::{
    ChannelOptions, DeviceOptions, DEFAULT_BRIGHTNESS, DEFAULT_LED_COUNT, RPI_PWM_CHANNELS,
    SK6812_STRIP, SK6812_STRIP_BGRW, SK6812_STRIP_BRGW, SK6812_STRIP_GBRW, SK6812_STRIP_GRBW,
    SK6812_STRIP_RBGW, SK6812_STRIP_RGBW, TARGET_FREQ, WS2811_STRIP_BGR, WS2811_STRIP_BRG,
    WS2811_STRIP_GBR, WS2811_STRIP_GRB, WS2811_STRIP_RBG, WS2811_STRIP_RGB, WS2812_STRIP,
};
pub use pacing::{transmission_window, PacingController};
pub use ws2811::Ws2811;
