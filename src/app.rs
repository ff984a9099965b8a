//! App and Job capability traits.
//!
//! The core never sees concrete app or job types; hosts implement these
//! traits and hand the scheduler opaque handles at registration time.

use crate::surface::Surface;
use std::any::Any;
use std::sync::Arc;

/// The latest value produced by a job.
///
/// Values are shared: one cached result may be read by several apps at
/// once, so jobs publish an `Arc` and apps downcast to the concrete type
/// they agreed on with the job.
pub type JobValue = Arc<dyn Any + Send + Sync>;

/// The error a job run may fail with.
///
/// Job errors are implementation-defined; the runner logs them and moves
/// on, so any boxed error will do.
pub type JobError = Box<dyn std::error::Error + Send + Sync>;

/// A visual unit that takes a turn on the display.
///
/// The scheduler calls `update` every frame while the app is visible
/// (and during the transition that brings it in or out), then `draw`
/// with the pan offset already applied to the surface.
pub trait App: Send {
    /// Advance internal state to the given timestamp.
    ///
    /// `data` is the bound job's latest cached value, or `None` when the
    /// app has no bound job or the job has not produced anything yet.
    fn update(&mut self, now_ms: u64, data: Option<JobValue>);

    /// Render current state onto the surface.
    ///
    /// The caller has already set the pan offset; apps draw at their
    /// natural coordinates and out-of-frame pixels are dropped by the
    /// surface.
    fn draw(&self, surface: &mut Surface);
}

/// A unit of background work polled on a fixed interval.
///
/// `run` executes on the job's own worker thread and may block for as
/// long as it needs; the frame loop only ever reads the cached result.
/// It must be safely re-invocable indefinitely.
pub trait Job: Send + Sync {
    /// Produce a fresh value, or fail.
    ///
    /// Failures are swallowed by the runner (logged, last good value
    /// retained); the next scheduled run proceeds on the normal interval.
    fn run(&self) -> Result<JobValue, JobError>;
}
