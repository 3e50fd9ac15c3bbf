//! OpenGL 3.3 backend over `glow`.
//!
//! The caller owns context creation and buffer swapping; this module only needs
//! a loaded `glow::Context` made current on the calling thread.
//!
//! Vertex attributes are bound by name before every link:
//! - `a_position`: location 0, `vec3`
//! - `a_texcoord`: location 1, `vec2` (normalized)
//! - `a_color`: location 2, four `u8` normalized to `vec4`
//!
//! Every draw sets these uniforms on the bound program when it declares them:
//! - `u_projview`: target projection times the current transform
//! - `u_use_texture`: whether a texture is bound for this draw
//! - `u_texture`: sampler on unit 0, which is reserved for the draw texture

mod backend;
mod init;
mod program;
mod resources;

pub use backend::GlBackend;
pub use init::GlInit;
pub use resources::{GlBuffer, GlProgram, GlTexture};
