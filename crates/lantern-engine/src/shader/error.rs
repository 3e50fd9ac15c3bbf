use std::path::PathBuf;

use crate::device::DeviceError;

use super::MAX_UNIFORM_NAME_LEN;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader source {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("uniform name is {len} bytes, the limit is {}", MAX_UNIFORM_NAME_LEN)]
    UniformNameTooLong { len: usize },
}
