//! Logger setup for the helper binary.
//!
//! Logs go to stderr so stdout stays machine-readable NDJSON/JSON.

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::io;

/// Install a stderr logger at `level`.
///
/// Returns false when a logger was already installed in this process.
pub fn init(level: LevelFilter) -> bool {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(level, config, io::stderr()).is_ok()
}
