//! 9-slice window skins loaded from `.rws` streams.

mod error;
mod format;
mod window_style;

pub use error::StyleError;
pub use format::{BackgroundMode, FormatVersion, HEADER_LEN, RwsHeader, SIGNATURE, Slot};
pub use window_style::WindowStyle;
