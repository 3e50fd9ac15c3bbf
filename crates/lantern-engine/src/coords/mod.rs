//! Coordinate types shared by draw calls, shaders and window styles.
//!
//! Canonical 2D space:
//! - Pixels of the current render target
//! - Origin top-left
//! - +X right, +Y down
//!
//! `Transform` maps model space into that space; backends append the target's
//! orthographic projection.

mod rect;
mod transform;

pub use rect::Rect;
pub use transform::Transform;
