//! # Carousel
//!
//! An app-rotation compositor for serpentine-wired LED matrix displays.
//!
//! Carousel drives a rotating set of small "apps" (independent units of
//! state + visual output) onto a shared pixel surface, refreshing each
//! app's data from background polling jobs on independent intervals and
//! animating a vertical wipe between apps.
//!
//! ## Core Concepts
//!
//! - **Pixel surface**: flat buffer addressed through the display's
//!   serpentine column wiring, with a pannable coordinate offset
//! - **Job runner**: per-job worker threads that cache their latest result
//! - **Scheduler**: ring rotation over registered apps, driving per-frame
//!   update/draw and the transition animation
//!
//! ## Example
//!
//! ```rust,ignore
//! use carousel::{Scheduler, Surface};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.register_job("weather", weather_job, Duration::from_secs(60))?;
//! scheduler.register_app("forecast", forecast_app, Some("weather"), None)?;
//! scheduler.start_jobs();
//!
//! let mut surface = Surface::new(64, 32);
//! loop {
//!     scheduler.update(now_ms());
//!     scheduler.draw(&mut surface);
//!     matrix.flush(surface.pixels());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod jobs;
pub mod schedule;
pub mod surface;

// Re-exports for convenience
pub use app::{App, Job, JobError, JobValue};
pub use jobs::{DataSlot, JobRunner};
pub use schedule::{RegistryError, Scheduler, SchedulerConfig};
pub use surface::{Rgb, Surface};
