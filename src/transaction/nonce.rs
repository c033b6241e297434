//! Per-sender serialization of the nonce-fetch to broadcast sequence.
//!
//! Two overlapping submissions from one sender can read the same nonce from the
//! node and collide. Holding a `SenderGuard` from the nonce fetch until the
//! broadcast finishes makes this client a single writer per address.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

const PRUNE_THRESHOLD: usize = 1024;

/// Lock table keyed by sender address. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct NonceCoordinator {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

/// Exclusive right to allocate and broadcast the next nonce for one sender.
#[derive(Debug)]
pub struct SenderGuard {
    sender: String,
    _guard: OwnedMutexGuard<()>,
}

impl SenderGuard {
    pub fn sender(&self) -> &str {
        &self.sender
    }
}

impl NonceCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other task holds `sender`, then hold it until the guard drops.
    pub async fn acquire(&self, sender: &str) -> SenderGuard {
        let key = sender.to_ascii_lowercase();
        let lock = {
            let mut locks = self.locks.lock();
            if locks.len() >= PRUNE_THRESHOLD {
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks.entry(key.clone()).or_default().clone()
        };
        debug!(sender = %key, "Waiting for sender lock");
        let guard = lock.lock_owned().await;
        SenderGuard { sender: key, _guard: guard }
    }

    /// Number of senders with a lock entry.
    pub fn tracked_senders(&self) -> usize {
        self.locks.lock().len()
    }
}
