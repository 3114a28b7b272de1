use std::future::Future;
use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;
use tokio::sync::mpsc;
use tracing::warn;

use crate::cancel::Cancel;
use crate::gate::Gate;
use crate::task::{self, Task, TaskError};
use crate::track::Tracker;

/// How tasks reach their handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A single dispatcher drains a bounded queue and spawns per item.
    Queued { depth: usize },
    /// The iterating caller spawns per item, no intermediary.
    Direct,
}

/// What to do when admission fails while cancellation is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireFailure {
    /// Log the dropped item and move on to the next one.
    Skip,
    /// Return the failure at once, without joining already-spawned handlers.
    Abort,
}

/// One pipeline run. The four benchmark variants are presets of this.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub tasks: usize,
    pub strategy: Strategy,
    pub capacity: Option<usize>,
    pub on_acquire_failure: AcquireFailure,
    /// When false, handler failures are logged instead of aggregated, and
    /// only admission failures reach the caller.
    pub track_handler_errors: bool,
}

/// Dispatcher task draining a buffered queue, unlimited concurrent handlers.
pub fn queued_unbounded(tasks: usize, depth: usize) -> Config {
    Config {
        tasks,
        strategy: Strategy::Queued { depth },
        capacity: None,
        on_acquire_failure: AcquireFailure::Skip,
        track_handler_errors: true,
    }
}

/// One handler task spawned per item at the point of iteration, no limit.
pub fn direct_unbounded(tasks: usize) -> Config {
    Config {
        tasks,
        strategy: Strategy::Direct,
        capacity: None,
        on_acquire_failure: AcquireFailure::Skip,
        track_handler_errors: true,
    }
}

/// Dispatcher pattern with an admission gate; items whose admission is
/// cancelled are dropped, the dispatcher keeps going.
pub fn queued_bounded(tasks: usize, depth: usize, capacity: usize) -> Config {
    Config {
        tasks,
        strategy: Strategy::Queued { depth },
        capacity: Some(capacity),
        on_acquire_failure: AcquireFailure::Skip,
        track_handler_errors: true,
    }
}

/// Direct spawning with an admission gate; a cancelled admission aborts the
/// whole run, and handler failures are only logged.
pub fn direct_bounded(tasks: usize, capacity: usize) -> Config {
    Config {
        tasks,
        strategy: Strategy::Direct,
        capacity: Some(capacity),
        on_acquire_failure: AcquireFailure::Abort,
        track_handler_errors: false,
    }
}

/// Run one pipeline to completion with a fresh cancellation signal.
pub async fn run<H, Fut>(config: Config, handler: H) -> Result<(), TaskError>
where
    H: Fn(Task) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    run_with_cancel(config, Arc::new(Cancel::new()), handler).await
}

/// Run one pipeline with a caller-supplied cancellation signal. The signal
/// also trips internally on the first tracked failure.
pub async fn run_with_cancel<H, Fut>(
    config: Config,
    cancel: Arc<Cancel>,
    handler: H,
) -> Result<(), TaskError>
where
    H: Fn(Task) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    let gate = config.capacity.map(Gate::new);
    match config.strategy {
        Strategy::Queued { depth } => queued(config, depth, gate, cancel, handler).await,
        Strategy::Direct => direct(config, gate, cancel, handler).await,
    }
}

async fn queued<H, Fut>(
    config: Config,
    depth: usize,
    gate: Option<Gate>,
    cancel: Arc<Cancel>,
    handler: H,
) -> Result<(), TaskError>
where
    H: Fn(Task) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Task>(depth);

    let dispatcher = tokio::spawn(async move {
        let mut tracker = Tracker::new(Arc::clone(&cancel));
        while let Some(task) = rx.recv().await {
            let permit = match admit(&gate, &cancel, &task, config.on_acquire_failure).await {
                Admission::Open(permit) => permit,
                Admission::Skipped => continue,
                Admission::Aborted(err) => {
                    tracker.abandon();
                    return Err(err);
                }
            };
            tracker.spawn(handle_one(
                task,
                handler.clone(),
                Arc::clone(&cancel),
                permit,
                config.track_handler_errors,
            ));
        }
        tracker.wait().await
    });

    for task in task::generate(config.tasks) {
        // Send failure means the dispatcher bailed out early; its own result
        // carries the reason.
        if tx.send(task).await.is_err() {
            break;
        }
    }
    drop(tx);

    dispatcher.await?
}

async fn direct<H, Fut>(
    config: Config,
    gate: Option<Gate>,
    cancel: Arc<Cancel>,
    handler: H,
) -> Result<(), TaskError>
where
    H: Fn(Task) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    let mut tracker = Tracker::new(Arc::clone(&cancel));
    for task in task::generate(config.tasks) {
        let permit = match admit(&gate, &cancel, &task, config.on_acquire_failure).await {
            Admission::Open(permit) => permit,
            Admission::Skipped => continue,
            Admission::Aborted(err) => {
                tracker.abandon();
                return Err(err);
            }
        };
        tracker.spawn(handle_one(
            task,
            handler.clone(),
            Arc::clone(&cancel),
            permit,
            config.track_handler_errors,
        ));
    }
    tracker.wait().await
}

enum Admission {
    Open(Option<OwnedSemaphorePermit>),
    Skipped,
    Aborted(TaskError),
}

async fn admit(
    gate: &Option<Gate>,
    cancel: &Cancel,
    task: &Task,
    on_failure: AcquireFailure,
) -> Admission {
    let Some(gate) = gate else {
        return Admission::Open(None);
    };
    match gate.acquire(cancel).await {
        Ok(permit) => Admission::Open(Some(permit)),
        Err(err) => match on_failure {
            AcquireFailure::Skip => {
                warn!(task = task.id, error = %err, "admission failed, dropping task");
                Admission::Skipped
            }
            AcquireFailure::Abort => Admission::Aborted(err),
        },
    }
}

async fn handle_one<H, Fut>(
    task: Task,
    handler: H,
    cancel: Arc<Cancel>,
    permit: Option<OwnedSemaphorePermit>,
    track_errors: bool,
) -> Result<(), TaskError>
where
    H: Fn(Task) -> Fut,
    Fut: Future<Output = Result<(), TaskError>>,
{
    // Held for the whole handler; dropping it releases the gate slot.
    let _permit = permit;
    // Start-boundary check only; a handler past this point always runs out.
    if cancel.is_triggered() {
        return Ok(());
    }
    let id = task.id;
    match handler(task).await {
        Ok(()) => Ok(()),
        Err(err) if track_errors => Err(err),
        Err(err) => {
            warn!(task = id, error = %err, "task failed");
            Ok(())
        }
    }
}
