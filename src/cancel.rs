use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// One-shot cancellation signal shared by a pipeline run. Handlers consult it
/// only at their start boundary; a handler already past that point runs to
/// completion.
#[derive(Default)]
pub struct Cancel {
    flag: AtomicBool,
    notify: Notify,
}

impl Cancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Resolve once the signal fires. Returns immediately if already fired.
    pub async fn triggered(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register with the Notify before re-checking the flag, so a trigger
        // between the check and the await cannot be missed.
        notified.as_mut().enable();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}
