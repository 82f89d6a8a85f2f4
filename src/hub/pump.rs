//! Connection pump writer loop
//!
//! One writer loop runs per viewer connection and is the only place
//! that touches the outbound side of that connection. It drains the
//! pump's bounded queue, coalesces any backlog into a single
//! transmission unit, and keeps the peer alive with periodic pings.
//! Every write is bounded by a deadline; a missed deadline is terminal
//! for the pump and for nothing else.
//!
//! The transport is abstracted behind [`FrameSink`] so the loop can be
//! exercised without a live WebSocket.

use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;
use tokio::time::{interval_at, timeout, Instant};

use super::config::PumpConfig;
use super::error::PumpError;

/// Outbound side of a viewer connection
pub trait FrameSink {
    /// Transmit one unit of frame data
    async fn send_frame(&mut self, payload: Bytes) -> Result<(), PumpError>;

    /// Transmit a liveness probe
    async fn send_ping(&mut self) -> Result<(), PumpError>;

    /// Notify the peer that the connection is going away
    async fn send_close(&mut self) -> Result<(), PumpError>;
}

/// Pump messages from the hub onto the connection
///
/// Runs until the queue is closed (hub shutdown, unregistration or
/// overflow eviction) or a write fails. Queue closure is the clean exit:
/// the peer is notified best-effort before the loop returns.
pub async fn run_writer<S: FrameSink>(
    mut sink: S,
    mut queue: mpsc::Receiver<Bytes>,
    config: PumpConfig,
) -> Result<(), PumpError> {
    let ping_period = config.ping_period();
    let mut heartbeat = interval_at(Instant::now() + ping_period, ping_period);

    loop {
        tokio::select! {
            next = queue.recv() => match next {
                Some(first) => {
                    let unit = coalesce(first, &mut queue);
                    timeout(config.write_deadline, sink.send_frame(unit))
                        .await
                        .map_err(|_| PumpError::WriteDeadlineExceeded)??;
                }
                None => {
                    // The hub closed the queue.
                    let _ = timeout(config.write_deadline, sink.send_close()).await;
                    return Ok(());
                }
            },
            _ = heartbeat.tick() => {
                timeout(config.write_deadline, sink.send_ping())
                    .await
                    .map_err(|_| PumpError::WriteDeadlineExceeded)??;
            }
        }
    }
}

/// Merge everything already queued into one transmission unit
///
/// Messages are concatenated in enqueue order, so a backlogged viewer
/// receives one large write instead of many small ones.
fn coalesce(first: Bytes, queue: &mut mpsc::Receiver<Bytes>) -> Bytes {
    if queue.is_empty() {
        return first;
    }

    let mut unit = BytesMut::with_capacity(first.len() * (queue.len() + 1));
    unit.extend_from_slice(&first);
    while let Ok(next) = queue.try_recv() {
        unit.extend_from_slice(&next);
    }
    unit.freeze()
}
