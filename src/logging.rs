// src/logging.rs

//! Logging setup for `swarmherd` using `tracing` + `tracing-subscriber`.
//!
//! Two layers:
//! - an ANSI stderr layer, so ERROR/WARN reach the interactive user in
//!   color while stdout stays free for the menu and the node's own output
//! - a plain append-only per-run file under the logs directory
//!
//! The log level comes from the `SWARMHERD_LOG` environment variable
//! (e.g. "info", "debug"), defaulting to `info`. The CLI surface takes no
//! flags, so there is no flag override.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::errors::Result;

/// Initialise the global logging subscriber.
///
/// Creates the logs directory if needed and returns the path of this run's
/// log file. Safe to call once at startup.
pub fn init_logging(logs_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(logs_dir)?;
    let log_path = logs_dir.join(format!("run-{}.log", std::process::id()));
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(env_filter()),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Arc::new(log_file))
                .with_filter(env_filter()),
        )
        .try_init()
        .map_err(anyhow::Error::new)?;

    Ok(log_path)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("SWARMHERD_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
}
