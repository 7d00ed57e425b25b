//! Tracing setup for the `vkwall` binary
//!
//! Events go to a size-rotated `vkwall.log` in the configured directory and
//! are duplicated to stderr. File writes are handed to a background worker;
//! keep the returned [`WorkerGuard`] alive until exit so buffered lines are
//! flushed.

use anyhow::{Context, Result};
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Name of the active log file; archives get `.1`, `.2`, ... suffixes
pub const LOG_FILE_NAME: &str = "vkwall.log";

/// Path of the active log file for a configuration
pub fn log_file_path(logging: &LoggingConfig) -> PathBuf {
    logging.dir.join(LOG_FILE_NAME)
}

/// Open the size-rotated log file, creating the directory if needed
///
/// The file rolls over once it reaches `max_size_bytes`; at most `max_files`
/// archives are kept.
pub fn file_appender(logging: &LoggingConfig) -> io::Result<BasicRollingFileAppender> {
    std::fs::create_dir_all(&logging.dir)?;

    BasicRollingFileAppender::new(
        log_file_path(logging),
        RollingConditionBasic::new().max_size(logging.max_size_bytes),
        logging.max_files,
    )
}

/// Install the global subscriber: rotating file sink plus stderr
pub fn init(logging: &LoggingConfig, verbose: bool) -> Result<WorkerGuard> {
    let appender = file_appender(logging).with_context(|| {
        format!(
            "Failed to open log file: {}",
            log_file_path(logging).display()
        )
    })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = if verbose {
        EnvFilter::new("vkwall=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(writer))
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init()
                .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(fmt::layer().with_writer(io::stderr))
                .try_init()
                .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
        }
    }

    Ok(guard)
}
