//! Diagnostics for the scheduler.
//!
//! The library only emits `tracing` events: `warn!` when an input record is
//! skipped or an activity ends up with a negative late start, `debug!` per
//! scheduled activity in each pass, `trace!` for ignored predecessor ids.
//! This module lets the `cpm` binary (or any embedding program) print them
//! on stderr, leaving stdout to the schedule table.
//!
//! The level is taken from the caller first, then from `CPM_LOG`, and is
//! `info` otherwise.

use std::error::Error;
use tracing::Level;
use tracing_subscriber::fmt;

pub const LOG_ENV_VAR: &str = "CPM_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Level requested through `CPM_LOG`, if it names one.
fn level_from_env() -> Option<Level> {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|value| value.trim().parse().ok())
}

/// Installs the global stderr subscriber for scheduler diagnostics.
/// Fails if a subscriber is already installed.
pub fn init_logging(level: Option<LogLevel>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let level = level
        .map(Level::from)
        .or_else(level_from_env)
        .unwrap_or(Level::INFO);

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
}
