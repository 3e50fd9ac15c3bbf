//! Native GPU seam.
//!
//! This module is responsible for:
//! - the [`Backend`] trait every native implementation provides
//! - [`Gpu`], the shared owner of a backend and of the one "active program" cell
//! - the glow (OpenGL 3.3) backend under [`gl`]
//!
//! Native handles release themselves on `Drop`, so ownership of a handle is the
//! GPU lifetime of the resource.

mod backend;
mod error;
mod gpu;

pub mod gl;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{Backend, BufferKind, Image};
pub use error::{DeviceError, ShaderStage};
pub use gpu::Gpu;
