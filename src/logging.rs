//! Logging setup.
//!
//! `RUST_LOG` controls the filter (default `warn`). The interactive UI owns
//! stdout and stderr shares the screen, so it logs to a file instead.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

impl LogTarget {
    /// Default log file for the interactive UI.
    pub fn default_file() -> Self {
        Self::File(std::env::temp_dir().join("scenario-typewriter.log"))
    }
}

/// Install the global subscriber.
///
/// Returns a guard that must be held until exit when logging to a file.
/// Installing twice is a no-op.
pub fn init(target: &LogTarget) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            None
        }
        LogTarget::File(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map_or_else(|| "scenario-typewriter.log".into(), ToOwned::to_owned);
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Some(guard)
        }
    }
}
