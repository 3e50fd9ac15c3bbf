mod config;
mod runtime;
mod scene;

use anyhow::Result;

use lantern_engine::logging::{init_logging, LoggingConfig};

use crate::config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("starting lantern studio");

    runtime::run(StudioConfig::default())
}
