//! Scheduling: the app rotation ring and transition animation.
//!
//! The scheduler is the crate's facade: hosts register jobs and apps
//! through it, then drive `update`/`draw` from their frame loop.

#[allow(clippy::module_inception)]
mod scheduler;

pub use scheduler::{Scheduler, SchedulerConfig};

/// Setup-time registration failures.
///
/// These are the only errors the crate surfaces as `Result`; everything
/// past registration is recovered locally so the display keeps running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A job with this name is already registered.
    #[error("job '{0}' is already registered")]
    DuplicateJob(String),
    /// An app with this name is already registered.
    #[error("app '{0}' is already registered")]
    DuplicateApp(String),
}
