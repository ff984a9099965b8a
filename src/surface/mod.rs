//! Pixel surface: the drawing target shared by all apps.
//!
//! The surface owns a flat buffer of packed-RGB pixels and the address
//! translation for the display's serpentine column wiring. A pannable
//! coordinate offset supports the scheduler's transition animation.

mod color;
#[allow(clippy::module_inception)]
mod surface;

pub use color::Rgb;
pub use surface::Surface;
