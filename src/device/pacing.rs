//! Frame pacing
//!
//! Real WS281x hardware shifts bits onto the strip at a fixed frequency,
//! so a frame of N LEDs occupies the bus for a predictable window. The
//! pacing controller reproduces that window so the emulator can never
//! deliver frames faster than real hardware could, keeping animation
//! timing honest for code developed against the simulator.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Time one frame occupies the bus:
/// `(8 * 3 * led_count + 0.05) / frequency` seconds
/// (8 bits of color depth, 3 colors per pixel, plus the reset latch).
/// See the WS2811 datasheet for details.
pub fn transmission_window(led_count: usize, frequency: u32) -> Duration {
    let dt = (8.0 * 3.0 * led_count as f64 + 0.05) / f64::from(frequency.max(1));
    Duration::from_secs_f64(dt)
}

/// Enforces the minimum interval between frame publications
///
/// Pacing is advisory and local to the producer; it never coordinates
/// with viewers. The bus, not the receiver, is the bottleneck.
#[derive(Debug)]
pub struct PacingController {
    min_interval: Duration,
    last_render: Option<Instant>,
}

impl PacingController {
    /// Create a controller for a strip of `led_count` LEDs driven at
    /// `frequency` Hz
    pub fn new(led_count: usize, frequency: u32) -> Self {
        Self {
            min_interval: transmission_window(led_count, frequency),
            last_render: None,
        }
    }

    /// The minimum time between consecutive frame publications
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Suspend until the previous frame's transmission window has passed
    ///
    /// Returns immediately if nothing has been rendered yet or the
    /// window has already elapsed.
    pub async fn wait(&self) {
        if let Some(last_render) = self.last_render {
            sleep_until(last_render + self.min_interval).await;
        }
    }

    /// Record the start of a new transmission window
    pub fn mark(&mut self) {
        self.last_render = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmission_window_math() {
        // 16 LEDs at 800kHz: (8*3*16 + 0.05) / 800000 = 480.0625us
        let window = transmission_window(16, 800_000);
        let expected = 384.05 / 800_000.0;

        assert!((window.as_secs_f64() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_frequency_does_not_panic() {
        let window = transmission_window(16, 0);
        assert!(window.as_secs_f64().is_finite());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_before_first_render_returns_immediately() {
        let pacing = PacingController::new(16, 800_000);

        let start = Instant::now();
        pacing.wait().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_enforces_min_interval() {
        let mut pacing = PacingController::new(16, 800_000);

        pacing.mark();
        let start = Instant::now();
        pacing.wait().await;

        assert!(start.elapsed() >= pacing.min_interval());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_after_window_elapsed_returns_immediately() {
        let mut pacing = PacingController::new(16, 800_000);

        pacing.mark();
        tokio::time::advance(pacing.min_interval() * 2).await;

        let start = Instant::now();
        pacing.wait().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
