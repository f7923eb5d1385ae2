//! Pointer-move notification hub.
//!
//! Each subscriber holds its own [`PointerSubscription`]; dropping the handle
//! is the unsubscribe, so several pickers can listen to one hub without
//! sharing any global listener.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Moves buffered per subscriber before the oldest are dropped.
const DEFAULT_CAPACITY: usize = 64;

/// Cursor position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMove {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerMove {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Broadcasts pointer moves to every live subscription.
#[derive(Debug, Clone)]
pub struct PointerEvents {
    sender: broadcast::Sender<PointerMove>,
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver a move; returns how many subscriptions received it.
    pub fn publish(&self, event: PointerMove) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> PointerSubscription {
        PointerSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned subscription to a [`PointerEvents`] hub.
pub struct PointerSubscription {
    receiver: broadcast::Receiver<PointerMove>,
}

impl PointerSubscription {
    /// Drain queued moves without waiting and keep only the newest.
    pub fn latest(&mut self) -> Option<PointerMove> {
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => latest = Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Pointer subscription lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        latest
    }

    /// Wait for the next move. `None` once the hub is gone.
    pub async fn next(&mut self) -> Option<PointerMove> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Pointer subscription lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
