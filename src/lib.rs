//! Four ways to fan out a fixed batch of short-lived tasks across concurrent
//! workers: queued vs direct dispatch, with and without a concurrency bound.

pub mod cancel;
pub mod gate;
pub mod limits;
pub mod pipeline;
pub mod task;
pub mod track;
