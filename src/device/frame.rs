//! Wire frame payload
//!
//! One JSON object per published frame, carrying the channel
//! configuration alongside the current LED words so a freshly connected
//! simulator can render without any other handshake state.

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;

use super::options::ChannelOptions;

/// A complete channel snapshot ready for serialization
///
/// Borrows the device's live state; the serialized bytes are the only
/// thing that leaves the producer's context.
#[derive(Debug, Serialize)]
pub struct FramePayload<'a> {
    /// Configuration of the channel being rendered
    pub option: &'a ChannelOptions,
    /// Current color words, one per LED
    pub leds: &'a [u32],
}

impl FramePayload<'_> {
    /// Serialize into a refcounted byte payload for fan-out
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::options::{ChannelOptions, WS2812_STRIP};

    #[test]
    fn test_payload_schema() {
        let option = ChannelOptions::new(3, WS2812_STRIP);
        let leds = [0xFF0000u32, 0x00FF00, 0x0000FF];
        let payload = FramePayload {
            option: &option,
            leds: &leds,
        };

        let bytes = payload.to_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["option"]["LedCount"], 3);
        assert_eq!(json["option"]["StripeType"], WS2812_STRIP);
        assert_eq!(json["leds"].as_array().unwrap().len(), 3);
        assert_eq!(json["leds"][0], 0xFF0000u32);
    }

    #[test]
    fn test_gamma_serializes_as_null_when_absent() {
        let option = ChannelOptions::new(1, WS2812_STRIP);
        let payload = FramePayload {
            option: &option,
            leds: &[0],
        };

        let json: serde_json::Value =
            serde_json::from_slice(&payload.to_bytes().unwrap()).unwrap();
        assert!(json["option"]["Gamma"].is_null());
    }
}
