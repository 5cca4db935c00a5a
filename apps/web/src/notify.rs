//! Change notification shared by the stateful components.
//!
//! Every mutation of filters or jobs bumps a revision counter. Rendered pages subscribe
//! through `/events` and re-render when the revision moves past the one they were built at.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Arc<watch::Sender<u64>>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Marks state as changed. Works with or without live subscribers.
    pub fn notify(&self) {
        self.tx.send_modify(|revision| *revision += 1);
    }

    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
