//! Lantern engine crate.
//!
//! Retained-mode rendering core: GPU geometry buffers, shader programs with a
//! deferred uniform cache, shapes and models, and 9-slice window skins. Native
//! calls go through the [`device::Backend`] trait; [`device::gl`] provides the
//! OpenGL implementation.

pub mod coords;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod style;
