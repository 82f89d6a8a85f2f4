//! The emulated WS281x device

use crate::error::{Error, Result};
use crate::hub::HubHandle;

use super::buffer::FrameBuffer;
use super::frame::FramePayload;
use super::options::DeviceOptions;
use super::pacing::PacingController;

/// An emulated ws2811 device
///
/// Drop-in stand-in for the hardware driver: instead of shifting bits
/// onto a strip, `render` serializes the current frame and hands it to
/// the [`Hub`](crate::hub::Hub) for fan-out to connected simulators.
/// Publication is fire-and-forget; slow or dead viewers never block the
/// producer.
pub struct Ws2811 {
    options: DeviceOptions,
    buffer: Option<FrameBuffer>,
    pacing: PacingController,
    hub: HubHandle,
}

impl Ws2811 {
    /// Create a device linked to a hub
    ///
    /// The options are copied in full (gamma table included), so later
    /// mutation of the caller's configuration cannot affect a running
    /// device.
    pub fn new(options: &DeviceOptions, hub: HubHandle) -> Self {
        let led_count = options.channels.first().map(|c| c.led_count).unwrap_or(0);
        Self {
            options: options.clone(),
            buffer: None,
            pacing: PacingController::new(led_count, options.frequency),
            hub,
        }
    }

    /// Initialize the device. Must be called once before any other
    /// method.
    pub fn init(&mut self) -> Result<()> {
        if self.buffer.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        self.buffer = Some(FrameBuffer::new(&self.options));
        Ok(())
    }

    /// Wait for the previous frame's transmission window to pass
    pub async fn wait(&self) {
        self.pacing.wait().await;
    }

    /// Publish the current frame to all connected viewers
    ///
    /// Waits out the pacing interval, serializes channel 0, hands the
    /// payload to the hub, then starts the next transmission window.
    /// Delivery is fire-and-forget.
    pub async fn render(&mut self) -> Result<()> {
        let buffer = self.buffer.as_ref().ok_or(Error::NotInitialized)?;
        self.pacing.wait().await;

        let option = self
            .options
            .channels
            .first()
            .ok_or(Error::ChannelOutOfRange { channel: 0 })?;
        let payload = FramePayload {
            option,
            leds: buffer.leds(0)?,
        }
        .to_bytes()?;

        self.hub.broadcast(payload);
        self.pacing.mark();
        Ok(())
    }

    /// Wait for the current frame to finish, then replace a channel's
    /// LEDs
    ///
    /// This is the only mutation path ordered with respect to in-flight
    /// renders; a write through it never lands mid-transmission-window.
    pub async fn set_leds_sync(&mut self, channel: usize, leds: &[u32]) -> Result<()> {
        self.pacing.wait().await;
        self.buffer
            .as_mut()
            .ok_or(Error::NotInitialized)?
            .set(channel, leds)
    }

    /// The LED words of a channel
    pub fn leds(&self, channel: usize) -> Result<&[u32]> {
        self.buffer
            .as_ref()
            .ok_or(Error::NotInitialized)?
            .leds(channel)
    }

    /// Mutable access to a channel's LED words
    ///
    /// Writes through this path skip the pacing wait and are not
    /// ordered against renders.
    pub fn leds_mut(&mut self, channel: usize) -> Result<&mut [u32]> {
        self.buffer
            .as_mut()
            .ok_or(Error::NotInitialized)?
            .leds_mut(channel)
    }

    /// The device configuration
    pub fn options(&self) -> &DeviceOptions {
        &self.options
    }

    /// Shut down the device and release the frame storage
    pub fn fini(&mut self) {
        self.buffer = None;
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    use crate::device::options::ChannelOptions;
    use crate::device::options::WS2812_STRIP;
    use crate::hub::Hub;

    use super::*;

    fn device_with_hub() -> (Ws2811, mpsc::Receiver<Bytes>) {
        let hub = Hub::spawn();
        let (tx, rx) = mpsc::channel(16);
        hub.register(1, tx);
        (Ws2811::new(&DeviceOptions::default(), hub), rx)
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let (mut device, _rx) = device_with_hub();

        device.init().unwrap();
        assert!(matches!(device.init(), Err(Error::AlreadyInitialized)));
    }

    #[tokio::test]
    async fn test_operations_before_init_fail() {
        let (mut device, _rx) = device_with_hub();

        assert!(matches!(device.render().await, Err(Error::NotInitialized)));
        assert!(matches!(device.leds(0), Err(Error::NotInitialized)));
        assert!(matches!(
            device.set_leds_sync(0, &[1]).await,
            Err(Error::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_set_leds_sync_rejects_oversized_write() {
        let (mut device, _rx) = device_with_hub();
        device.init().unwrap();
        device.set_leds_sync(0, &[7; 16]).await.unwrap();

        let result = device.set_leds_sync(0, &[1; 17]).await;

        assert!(matches!(result, Err(Error::LengthExceeded { .. })));
        assert_eq!(device.leds(0).unwrap(), &[7; 16]);
    }

    #[tokio::test]
    async fn test_render_broadcasts_frame_payload() {
        let (mut device, mut rx) = device_with_hub();
        device.init().unwrap();
        device.set_leds_sync(0, &[1, 2, 3]).await.unwrap();

        device.render().await.unwrap();

        let payload = rx.recv().await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(json["option"]["LedCount"], 16);
        assert_eq!(json["leds"].as_array().unwrap().len(), 16);
        assert_eq!(json["leds"][0], 1);
        assert_eq!(json["leds"][2], 3);
        assert_eq!(json["leds"][3], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_renders_respect_pacing() {
        let hub = Hub::spawn();
        let options = DeviceOptions::default()
            .frequency(800_000)
            .channels(vec![ChannelOptions::new(16, WS2812_STRIP)]);
        let mut device = Ws2811::new(&options, hub);
        device.init().unwrap();
        let min_interval = super::super::pacing::transmission_window(16, 800_000);

        device.render().await.unwrap();
        let start = Instant::now();
        device.render().await.unwrap();

        assert!(start.elapsed() >= min_interval);
    }

    #[tokio::test]
    async fn test_options_copied_at_construction() {
        let hub = Hub::spawn();
        let mut options =
            DeviceOptions::default().channels(vec![ChannelOptions::new(4, WS2812_STRIP)
                .gamma(vec![1, 2, 3])]);
        let device = Ws2811::new(&options, hub);

        options.channels[0].led_count = 999;
        options.channels[0].gamma.as_mut().unwrap()[0] = 0;

        assert_eq!(device.options().channels[0].led_count, 4);
        assert_eq!(device.options().channels[0].gamma.as_ref().unwrap()[0], 1);
    }

    #[tokio::test]
    async fn test_fini_releases_storage() {
        let (mut device, _rx) = device_with_hub();
        device.init().unwrap();

        device.fini();

        assert!(matches!(device.leds(0), Err(Error::NotInitialized)));
        device.init().unwrap();
    }
}
