//! Background jobs: interval workers and their cached results.
//!
//! Each registered job gets its own worker thread that runs the job,
//! publishes the result into a single-slot cache, waits out the interval
//! and goes again. The frame loop only ever snapshots the cache — it
//! never blocks on a job.

mod runner;
mod slot;

pub use runner::JobRunner;
pub use slot::DataSlot;
