//! Broadcast hub implementation
//!
//! The hub is the single authority over the connection registry. It runs
//! as one coordination task fed by an event channel, so registration,
//! deregistration and fan-out are serialized and membership never races
//! with iteration. Fan-out is strictly non-blocking: a pump whose queue
//! is full is evicted rather than waited on.

use std::collections::HashMap;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use super::error::PumpError;

/// Identity of a registered connection pump
pub type PumpId = u64;

/// Events processed by the hub's coordination loop
enum HubEvent {
    Register {
        id: PumpId,
        queue: mpsc::Sender<Bytes>,
    },
    Unregister {
        id: PumpId,
    },
    Broadcast {
        frame: Bytes,
    },
    ConnectionCount {
        reply: oneshot::Sender<usize>,
    },
    Shutdown,
}

/// Central broadcaster for all viewer connections
///
/// Owns the registry of live pump queues. Created with [`Hub::spawn`],
/// which moves the hub onto its own task and returns a cheaply clonable
/// [`HubHandle`] for producers and the transport layer.
pub struct Hub {
    events: mpsc::UnboundedReceiver<HubEvent>,
    pumps: HashMap<PumpId, mpsc::Sender<Bytes>>,
}

impl Hub {
    /// Start the coordination loop on its own task
    pub fn spawn() -> HubHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let hub = Hub {
            events: events_rx,
            pumps: HashMap::new(),
        };
        tokio::spawn(hub.run());
        HubHandle { events: events_tx }
    }

    async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            match event {
                HubEvent::Register { id, queue } => {
                    self.pumps.insert(id, queue);
                    tracing::info!(pump = id, viewers = self.pumps.len(), "Viewer registered");
                }
                HubEvent::Unregister { id } => {
                    // Dropping the sender closes the pump's queue and
                    // terminates its writer loop.
                    if self.pumps.remove(&id).is_some() {
                        tracing::info!(pump = id, viewers = self.pumps.len(), "Viewer unregistered");
                    }
                }
                HubEvent::Broadcast { frame } => self.fan_out(frame),
                HubEvent::ConnectionCount { reply } => {
                    let _ = reply.send(self.pumps.len());
                }
                HubEvent::Shutdown => break,
            }
        }

        // Close every queue so all writer loops flush and exit.
        self.pumps.clear();
        tracing::debug!("Hub stopped");
    }

    /// Enqueue a frame into every registered pump, evicting stalled ones
    ///
    /// `Bytes` is reference counted, so each pump shares the same frame
    /// allocation; only the handle is cloned.
    fn fan_out(&mut self, frame: Bytes) {
        let mut stalled = Vec::new();

        for (id, queue) in &self.pumps {
            match queue.try_send(frame.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        pump = id,
                        error = %PumpError::QueueOverflow,
                        "Dropping unresponsive viewer"
                    );
                    stalled.push(*id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    stalled.push(*id);
                }
            }
        }

        for id in stalled {
            self.pumps.remove(&id);
        }
    }
}

/// Handle to a running [`Hub`]
///
/// All methods are fire-and-forget from the caller's perspective; once
/// the hub has shut down they become no-ops.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::UnboundedSender<HubEvent>,
}

impl HubHandle {
    /// Add a pump's outbound queue to the registry
    ///
    /// Callers must not register the same id twice.
    pub fn register(&self, id: PumpId, queue: mpsc::Sender<Bytes>) {
        let _ = self.events.send(HubEvent::Register { id, queue });
    }

    /// Remove a pump from the registry and close its queue. No-op if
    /// the pump is not registered.
    pub fn unregister(&self, id: PumpId) {
        let _ = self.events.send(HubEvent::Unregister { id });
    }

    /// Fan a frame out to every registered pump without blocking
    pub fn broadcast(&self, frame: Bytes) {
        let _ = self.events.send(HubEvent::Broadcast { frame });
    }

    /// Number of currently registered viewers
    pub async fn connection_count(&self) -> usize {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .events
            .send(HubEvent::ConnectionCount { reply: reply_tx })
            .is_err()
        {
            return 0;
        }
        reply_rx.await.unwrap_or(0)
    }

    /// Stop the hub, closing every pump queue
    pub fn shutdown(&self) {
        let _ = self.events.send(HubEvent::Shutdown);
    }
}
