use crate::device::DeviceError;

use super::Slot;

/// Failure to load a window style.
///
/// Images decoded before the failure are released before this is returned.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("not a window style (signature {found:?})")]
    Signature { found: [u8; 4] },

    #[error("unsupported window style version {0}")]
    Version(i16),

    #[error("unknown background mode {0}")]
    BackgroundMode(u8),

    #[error("{slot:?} image has negative size {width}x{height}")]
    ImageSize { slot: Slot, width: i16, height: i16 },

    /// The stream ended early or could not be read.
    #[error("failed to read window style: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Device(DeviceError),
}

impl From<DeviceError> for StyleError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::Io(io) => StyleError::Io(io),
            other => StyleError::Device(other),
        }
    }
}
