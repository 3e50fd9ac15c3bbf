use std::fmt;

use super::BufferKind;

/// Programmable pipeline stage, for compile diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure of a native GPU operation.
///
/// Every variant is permanent for the call that produced it; nothing here is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The driver refused to create a native object.
    #[error("failed to allocate {what}: {message}")]
    Allocation { what: &'static str, message: String },

    /// Creating or filling a buffer's storage failed; the buffer was released.
    #[error("failed to upload {len} element(s) to {kind} buffer (GL error {code:#06x})")]
    Upload { kind: BufferKind, len: usize, code: u32 },

    /// Shader compilation failed. `log` is the driver's info log, verbatim.
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    /// Program linking failed. `log` is the driver's info log, verbatim.
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    #[error("failed to bind shader program (GL error {code:#06x})")]
    Bind { code: u32 },

    #[error("render target is not usable: {0}")]
    Target(String),

    #[error("texture data holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    TextureData { width: u32, height: u32, expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
