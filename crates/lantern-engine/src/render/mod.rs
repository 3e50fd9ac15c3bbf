//! Retained-mode drawing.
//!
//! Convention:
//! - geometry is in target pixels (top-left origin, +Y down on the backbuffer)
//! - a [`Shape`] is one draw call, a [`Model`] is an ordered list of shapes under
//!   one transform and one program activation
//! - image helpers stream their quads through [`Backend::draw_vertices`]
//!
//! [`Backend::draw_vertices`]: crate::device::Backend::draw_vertices

mod ctx;
mod error;
mod image;
mod model;
mod shape;

pub use ctx::RenderContext;
pub use error::RenderError;
pub use image::{draw_gradient, draw_masked, draw_region_masked, draw_scaled_masked, draw_tiled_masked};
pub use model::{Model, ModelId};
pub use shape::Shape;
