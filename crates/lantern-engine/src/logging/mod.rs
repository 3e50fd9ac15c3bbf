//! Logging setup.
//!
//! The library only emits through the `log` facade. Binaries install
//! `env_logger` through [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
