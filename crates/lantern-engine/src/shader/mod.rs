//! Shader programs and deferred uniforms.
//!
//! Uniform writes to the active program go straight to the backend. Writes to
//! any other program are queued in that program's cache and replayed, in order
//! and exactly once, the next time it is activated. A name is cached at most
//! once: a newer write evicts the older entry and moves to the back.

mod error;
mod program;
mod uniform;

pub use error::ShaderError;
pub use program::{ProgramId, ShaderProgram, ShaderSource};
pub use uniform::{MAX_UNIFORM_NAME_LEN, UniformKind, UniformValue};

pub(crate) use program::activate;
