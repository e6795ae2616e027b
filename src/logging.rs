//! Side-channel log file.
//!
//! Operator output stays on stdout/stderr; everything logged through
//! `tracing` goes to the log file so that the MCP stdio transport is never
//! polluted.

use std::{
    fmt,
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

pub const DEFAULT_LOG_FILE: &str = "strloc.log";

/// Keeps the non-blocking writer flushing until the process exits.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "strloc=debug" } else { "strloc=warn" })
    })
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbose`. If the log file cannot be opened, logs go
/// to stderr instead. Calling this more than once is a no-op.
pub fn init(log_file: Option<&Path>, verbose: bool) {
    let log_path = log_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter(verbose))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LocalTimer)
                .try_init()
                .is_ok();
            if installed {
                let _ = LOG_GUARD.set(guard);
                tracing::debug!(path = %log_path.display(), "logging initialized");
            }
        }
        Err(e) => {
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter(verbose))
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(LocalTimer)
                .try_init()
                .is_ok();
            if installed {
                tracing::warn!(error = %e, path = %log_path.display(), "failed to open log file; using stderr");
            }
        }
    }
}
