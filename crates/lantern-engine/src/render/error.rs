use crate::device::DeviceError;
use crate::shader::ShaderError;

/// Failure of a draw entry point.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}
