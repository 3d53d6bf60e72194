use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting semaphore bounding simultaneous outbound provider calls.
///
/// Only a concurrency budget is tracked; no connections are pooled.
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One occupied slot. The slot is returned when the permit is dropped.
#[must_use = "dropping the permit releases the slot immediately"]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl GatePermit {
    pub fn release(self) {}
}

impl ConcurrencyGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits up to `timeout` for a free slot. Returns `None` on timeout.
    ///
    /// Waiters are served in FIFO order. Dropping the returned future while it
    /// waits gives up the place in line without taking a slot.
    pub async fn acquire(&self, timeout: Duration) -> Option<GatePermit> {
        let acquire = Arc::clone(&self.semaphore).acquire_owned();
        match tokio::time::timeout(timeout, acquire).await {
            Ok(Ok(permit)) => Some(GatePermit { _permit: permit }),
            // The semaphore is never closed.
            Ok(Err(_)) => None,
            Err(_) => None,
        }
    }

    pub fn try_acquire(&self) -> Option<GatePermit> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| GatePermit { _permit: permit })
    }

    pub fn in_use(&self) -> usize {
        self.capacity
            .saturating_sub(self.semaphore.available_permits())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
