use std::error::Error;
use std::time::Duration;

use tokio::time::sleep;

const BASE_DURATION: Duration = Duration::from_micros(10);
const HEAVY_DURATION: Duration = Duration::from_micros(50);
const HEAVIEST_DURATION: Duration = Duration::from_micros(200);

pub type TaskError = Box<dyn Error + Send + Sync>;

/// One unit of synthetic work. Immutable once created; read exactly once by
/// its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: usize,
    pub data: String,
}

/// Build the full batch of tasks, ids `0..count` in source order.
/// Regenerating yields identical tasks.
pub fn generate(count: usize) -> Vec<Task> {
    (0..count)
        .map(|id| Task {
            id,
            data: format!("task data {id}"),
        })
        .collect()
}

/// Simulated processing time for a task.
/// - most tasks take the base duration
/// - every 10th task is heavier
/// - every 100th task is heavier still (supersedes the 10th-task tier)
pub fn duration_for(id: usize) -> Duration {
    if id % 100 == 0 {
        HEAVIEST_DURATION
    } else if id % 10 == 0 {
        HEAVY_DURATION
    } else {
        BASE_DURATION
    }
}

/// The reference handler: sleep for the task's simulated processing time.
/// Never fails here, but the error channel stays open so callers can swap in
/// failing handlers.
pub async fn process(task: Task) -> Result<(), TaskError> {
    sleep(duration_for(task.id)).await;
    Ok(())
}
