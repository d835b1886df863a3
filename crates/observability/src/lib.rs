//! Tracing/logging setup shared by the `culookup` binaries.

/// Tracing configuration (filters, writers).
pub mod tracing;

pub use crate::tracing::{DEFAULT_LOG_FILE, LogConfig};

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &LogConfig) -> std::io::Result<()> {
    crate::tracing::init(config)
}
