use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::cancel::Cancel;
use crate::task::TaskError;

/// Counting admission gate bounding how many handlers run at once. Capacity is
/// fixed at construction and must be positive.
#[derive(Clone)]
pub struct Gate {
    sem: Arc<Semaphore>,
}

impl Gate {
    pub fn new(capacity: usize) -> Self {
        Gate {
            sem: Arc::new(Semaphore::new(capacity)),
        }
    }

    /// Wait for a free slot, or for the cancellation signal, whichever first.
    /// The returned permit releases the slot when dropped, on every exit path
    /// of the handler holding it.
    pub async fn acquire(&self, cancel: &Cancel) -> Result<OwnedSemaphorePermit, TaskError> {
        tokio::select! {
            permit = Arc::clone(&self.sem).acquire_owned() => Ok(permit?),
            _ = cancel.triggered() => Err("admission wait cancelled".into()),
        }
    }
}
