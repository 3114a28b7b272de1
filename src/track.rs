use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;
use tracing::warn;

use crate::cancel::Cancel;
use crate::task::TaskError;

/// Join barrier over all spawned handlers of one pipeline run. The first
/// failure is retained and trips the shared cancellation signal; later
/// failures are logged and dropped.
pub struct Tracker {
    set: JoinSet<()>,
    cancel: Arc<Cancel>,
    first_error: Arc<Mutex<Option<TaskError>>>,
}

impl Tracker {
    pub fn new(cancel: Arc<Cancel>) -> Self {
        Tracker {
            set: JoinSet::new(),
            cancel,
            first_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Register one handler with the barrier.
    pub fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        let cancel = Arc::clone(&self.cancel);
        let slot = Arc::clone(&self.first_error);
        self.set.spawn(async move {
            if let Err(err) = fut.await {
                record(&slot, &cancel, err);
            }
        });
    }

    /// Block until every registered handler has finished, then surface the
    /// first failure, if any.
    pub async fn wait(mut self) -> Result<(), TaskError> {
        while let Some(joined) = self.set.join_next().await {
            if let Err(join_err) = joined {
                record(&self.first_error, &self.cancel, join_err.into());
            }
        }
        match self.first_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Leave in-flight handlers running detached instead of joining them.
    pub fn abandon(mut self) {
        self.set.detach_all();
    }
}

fn record(slot: &Mutex<Option<TaskError>>, cancel: &Cancel, err: TaskError) {
    let mut slot = slot.lock().unwrap();
    if slot.is_none() {
        *slot = Some(err);
        drop(slot);
        cancel.trigger();
    } else {
        warn!(error = %err, "dropping failure reported after the first");
    }
}
