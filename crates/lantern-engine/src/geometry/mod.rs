//! CPU-side geometry and its GPU snapshots.
//!
//! A [`GeometryBuffer`] is an append-only CPU list plus an optional immutable GPU
//! copy made by [`GeometryBuffer::upload`]. The GPU copy only changes on upload.

mod buffer;
mod topology;
mod vertex;

pub use buffer::{BufferElement, GeometryBuffer, IndexBuffer, VertexBuffer};
pub use topology::Topology;
pub use vertex::Vertex;
