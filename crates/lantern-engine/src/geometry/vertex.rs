use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// One vertex as uploaded to the GPU.
///
/// Layout (24 bytes, no padding):
/// - `x, y, z`: position in model space
/// - `u, v`: normalized texture coordinates (`0..1`)
/// - `color`: RGBA8, multiplied with the texture sample
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
    pub color: Color,
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32, color: Color) -> Self {
        Self { x, y, z, u, v, color }
    }

    /// Untextured 2D vertex.
    #[inline]
    pub const fn at(x: f32, y: f32, color: Color) -> Self {
        Self::new(x, y, 0.0, 0.0, 0.0, color)
    }
}
