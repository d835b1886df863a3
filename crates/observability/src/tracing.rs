//! Tracing/logging initialization.
//!
//! Records are JSON lines with timestamps, filtered via `RUST_LOG`, and go
//! either to stderr or appended to a log file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Log file used by the CLI unless told otherwise.
pub const DEFAULT_LOG_FILE: &str = "cu_sc_tool.log";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Append to this file; `None` writes to stderr.
    pub file: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            default_filter: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn stderr() -> Self {
        Self {
            file: None,
            ..Self::default()
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Fails only if
/// the log file cannot be opened.
pub fn init(config: &LogConfig) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = builder.with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}
