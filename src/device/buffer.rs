//! Per-channel LED frame storage
//!
//! The buffer holds the current color word for every LED on every channel.
//! It is owned by the device and only ever read or written from the
//! producer's context; fan-out to viewers works on a serialized snapshot.

use crate::error::{Error, Result};

use super::options::{DeviceOptions, RPI_PWM_CHANNELS};

/// Current LED state for all channels
#[derive(Debug)]
pub struct FrameBuffer {
    /// One color-word vector per PWM channel. Unconfigured channels
    /// have zero capacity.
    channels: Vec<Vec<u32>>,
}

impl FrameBuffer {
    /// Allocate storage sized to each channel's configured LED count
    pub fn new(options: &DeviceOptions) -> Self {
        let mut channels = vec![Vec::new(); RPI_PWM_CHANNELS];
        for (i, channel) in options.channels.iter().take(RPI_PWM_CHANNELS).enumerate() {
            channels[i] = vec![0u32; channel.led_count];
        }
        Self { channels }
    }

    /// Overwrite the first `values.len()` LEDs of a channel
    ///
    /// LEDs beyond the input length retain their previous state; this
    /// does not zero-pad. Fails without modifying the buffer if the
    /// write is larger than the channel capacity.
    pub fn set(&mut self, channel: usize, values: &[u32]) -> Result<()> {
        let leds = self
            .channels
            .get_mut(channel)
            .ok_or(Error::ChannelOutOfRange { channel })?;
        if values.len() > leds.len() {
            return Err(Error::LengthExceeded {
                len: values.len(),
                capacity: leds.len(),
            });
        }
        leds[..values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Live view of a channel's LED words
    pub fn leds(&self, channel: usize) -> Result<&[u32]> {
        self.channels
            .get(channel)
            .map(Vec::as_slice)
            .ok_or(Error::ChannelOutOfRange { channel })
    }

    /// Mutable live view of a channel's LED words
    ///
    /// Writes through this path are not ordered with respect to the
    /// pacing interval; use the device's synchronous setter for that.
    pub fn leds_mut(&mut self, channel: usize) -> Result<&mut [u32]> {
        self.channels
            .get_mut(channel)
            .map(Vec::as_mut_slice)
            .ok_or(Error::ChannelOutOfRange { channel })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::options::{ChannelOptions, WS2812_STRIP};

    fn options(led_count: usize) -> DeviceOptions {
        DeviceOptions::default().channels(vec![ChannelOptions::new(led_count, WS2812_STRIP)])
    }

    #[test]
    fn test_set_and_read() {
        let mut buffer = FrameBuffer::new(&options(4));

        buffer.set(0, &[1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.leds(0).unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_partial_write_keeps_tail() {
        let mut buffer = FrameBuffer::new(&options(4));

        buffer.set(0, &[9, 9, 9, 9]).unwrap();
        buffer.set(0, &[1, 2]).unwrap();

        assert_eq!(buffer.leds(0).unwrap(), &[1, 2, 9, 9]);
    }

    #[test]
    fn test_oversized_write_rejected_unmodified() {
        let mut buffer = FrameBuffer::new(&options(2));
        buffer.set(0, &[7, 7]).unwrap();

        let result = buffer.set(0, &[1, 2, 3]);

        assert!(matches!(
            result,
            Err(Error::LengthExceeded { len: 3, capacity: 2 })
        ));
        assert_eq!(buffer.leds(0).unwrap(), &[7, 7]);
    }

    #[test]
    fn test_channel_out_of_range() {
        let mut buffer = FrameBuffer::new(&options(2));

        assert!(matches!(
            buffer.set(RPI_PWM_CHANNELS, &[1]),
            Err(Error::ChannelOutOfRange { .. })
        ));
        assert!(buffer.leds(RPI_PWM_CHANNELS).is_err());
    }

    #[test]
    fn test_unconfigured_channel_has_zero_capacity() {
        let mut buffer = FrameBuffer::new(&options(2));

        // Channel 1 exists but was not configured
        assert_eq!(buffer.leds(1).unwrap().len(), 0);
        assert!(buffer.set(1, &[1]).is_err());
        buffer.set(1, &[]).unwrap();
    }

    #[test]
    fn test_leds_mut_writes_through() {
        let mut buffer = FrameBuffer::new(&options(2));

        buffer.leds_mut(0).unwrap()[1] = 0xFF00FF;
        assert_eq!(buffer.leds(0).unwrap(), &[0, 0xFF00FF]);
    }
}
