//! Logging setup.
//!
//! Logs go to stderr so filtered text on stdout stays clean.
//!
//! ## Environment Variables
//!
//! 1. **`FILE_FILTER_LOG`** (highest priority). A bare level such as `debug` applies to the
//!    file-filter crates only; anything with `=`, `:` or `,` is used as a full filter.
//! 2. **`RUST_LOG`**, used as-is.
//! 3. **Default**: `warn`.

use anyhow::{Result, anyhow};
use std::env;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 3] = ["file_filter_core", "file_filter_buffer", "file_filter"];

/// Install the global subscriber.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(create_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))
}

fn create_filter() -> EnvFilter {
    if let Ok(level) = env::var("FILE_FILTER_LOG") {
        return EnvFilter::new(expand_level(&level));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new("warn")
}

fn expand_level(level: &str) -> String {
    if level.contains('=') || level.contains(':') || level.contains(',') {
        return level.to_string();
    }
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}
