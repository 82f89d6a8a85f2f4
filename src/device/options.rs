//! Device and channel configuration
//!
//! Mirrors the option layout of the rpi-ws281x driver so code written
//! against the real hardware bindings can drive the emulator unchanged.

use serde::{Deserialize, Serialize};

/// Number of PWM channels on the Raspberry Pi
pub const RPI_PWM_CHANNELS: usize = 2;

/// Target output frequency. Usually 800kHz, can go as low as 400kHz.
pub const TARGET_FREQ: u32 = 800_000;

/// Default number of LEDs on the stripe
pub const DEFAULT_LED_COUNT: usize = 16;

/// Default maximum brightness. Safe value between 0 and 255.
pub const DEFAULT_BRIGHTNESS: u8 = 64;

// Strip color layouts. Each byte of the constant is the bit position of
// one color within a packed LED word: 0xWWRRGGBB.
/// 4-color SK6812 strip, RGBW layout
pub const SK6812_STRIP_RGBW: u32 = 0x1810_0800;
/// 4-color SK6812 strip, RBGW layout
pub const SK6812_STRIP_RBGW: u32 = 0x1810_0008;
/// 4-color SK6812 strip, GRBW layout
pub const SK6812_STRIP_GRBW: u32 = 0x1808_1000;
/// 4-color SK6812 strip, GBRW layout
pub const SK6812_STRIP_GBRW: u32 = 0x1808_0010;
/// 4-color SK6812 strip, BRGW layout
pub const SK6812_STRIP_BRGW: u32 = 0x1800_1008;
/// 4-color SK6812 strip, BGRW layout
pub const SK6812_STRIP_BGRW: u32 = 0x1800_0810;
/// 3-color WS2811 strip, RGB layout
pub const WS2811_STRIP_RGB: u32 = 0x0010_0800;
/// 3-color WS2811 strip, RBG layout
pub const WS2811_STRIP_RBG: u32 = 0x0010_0008;
/// 3-color WS2811 strip, GRB layout
pub const WS2811_STRIP_GRB: u32 = 0x0008_1000;
/// 3-color WS2811 strip, GBR layout
pub const WS2811_STRIP_GBR: u32 = 0x0008_0010;
/// 3-color WS2811 strip, BRG layout
pub const WS2811_STRIP_BRG: u32 = 0x0000_1008;
/// 3-color WS2811 strip, BGR layout
pub const WS2811_STRIP_BGR: u32 = 0x0000_0810;
/// WS2812 strips use the GRB layout
pub const WS2812_STRIP: u32 = WS2811_STRIP_GRB;
/// 3-color SK6812 strips use the GRB layout
pub const SK6812_STRIP: u32 = WS2811_STRIP_GRB;

/// Per-channel configuration
///
/// Serializes with the field names the browser simulators expect
/// (`LedCount`, `StripeType`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelOptions {
    /// Number of LEDs, 0 if the channel is unused
    pub led_count: usize,

    /// Strip color layout, one of the `*_STRIP` constants
    pub stripe_type: u32,

    /// Maximum brightness of the LEDs, between 0 and 255
    pub brightness: u8,

    /// White shift value (bit position of white within a LED word)
    pub w_shift: u8,

    /// Red shift value
    pub r_shift: u8,

    /// Green shift value
    pub g_shift: u8,

    /// Blue shift value
    pub b_shift: u8,

    /// Gamma correction table (256 entries), or None for linear output
    pub gamma: Option<Vec<u8>>,
}

impl ChannelOptions {
    /// Create channel options for a strip, deriving the color shifts
    /// from the layout constant the way the hardware driver does at init.
    pub fn new(led_count: usize, stripe_type: u32) -> Self {
        Self {
            led_count,
            stripe_type,
            brightness: DEFAULT_BRIGHTNESS,
            w_shift: ((stripe_type >> 24) & 0xff) as u8,
            r_shift: ((stripe_type >> 16) & 0xff) as u8,
            g_shift: ((stripe_type >> 8) & 0xff) as u8,
            b_shift: (stripe_type & 0xff) as u8,
            gamma: None,
        }
    }

    /// Set the maximum brightness
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the gamma correction table
    pub fn gamma(mut self, gamma: Vec<u8>) -> Self {
        self.gamma = Some(gamma);
        self
    }
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self::new(DEFAULT_LED_COUNT, WS2812_STRIP)
    }
}

/// Device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOptions {
    /// Required output frequency in Hz
    pub frequency: u32,

    /// Channel configurations (at most [`RPI_PWM_CHANNELS`])
    pub channels: Vec<ChannelOptions>,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            frequency: TARGET_FREQ,
            channels: vec![ChannelOptions::default()],
        }
    }
}

impl DeviceOptions {
    /// Set the output frequency
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Replace the channel configurations
    pub fn channels(mut self, channels: Vec<ChannelOptions>) -> Self {
        self.channels = channels;
        self
    }
}
