//! Color model shared by geometry, shaders and window styles.
//!
//! Scope:
//! - 8-bit RGBA color values (straight alpha, the same layout the GPU reads)
//! - integer color-transform matrices
//! - per-corner gradient colors
//!
//! Everything here is plain value math; no GPU resources are held.

pub mod color;
pub mod gradient;
pub mod matrix;

pub use color::Color;
pub use gradient::CornerColors;
pub use matrix::ColorMatrix;
