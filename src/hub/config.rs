//! Pump configuration

use std::time::Duration;

/// Configuration for connection pumps
#[derive(Debug, Clone)]
pub struct PumpConfig {
    /// Outbound queue capacity in messages. A pump whose queue fills
    /// without draining is treated as unresponsive and dropped.
    pub queue_capacity: usize,

    /// Time allowed for any single write to the peer
    pub write_deadline: Duration,

    /// Time allowed without any inbound traffic before the connection
    /// is considered dead
    pub pong_timeout: Duration,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            write_deadline: Duration::from_secs(10),
            pong_timeout: Duration::from_secs(60),
        }
    }
}

impl PumpConfig {
    /// Set the outbound queue capacity
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Set the write deadline
    pub fn write_deadline(mut self, deadline: Duration) -> Self {
        self.write_deadline = deadline;
        self
    }

    /// Set the liveness timeout
    pub fn pong_timeout(mut self, timeout: Duration) -> Self {
        self.pong_timeout = timeout;
        self
    }

    /// Interval between liveness pings. Must be shorter than the pong
    /// timeout so a healthy peer always answers in time.
    pub fn ping_period(&self) -> Duration {
        self.pong_timeout * 9 / 10
    }
}
