/// Default worker count for the bounded variants: one per available CPU.
pub fn compute_workers() -> usize {
    num_cpus::get().max(1)
}

/// Compute the depth of the dispatch queue from the worker count.
/// Ensure the queue can absorb a burst ahead of the dispatcher.
pub fn compute_queue_depth(workers: usize) -> usize {
    (workers * 4).clamp(100, 1024)
}
