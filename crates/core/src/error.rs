//! Lookup error model.

use thiserror::Error;

use crate::id::CuId;

/// Result type used across the breakdown layer.
pub type LookupResult<T> = Result<T, LookupError>;

/// Lookup-level error.
///
/// Keep this focused on deterministic failures of the breakdown data itself.
/// File discovery and CSV problems belong to the ingestion layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The breakdown graph loops back onto a CU already being expanded.
    #[error("breakdown cycle detected: {}", render_path(.path))]
    BreakdownCycle { path: Vec<CuId> },

    /// A CU identifier was requested that no table knows about.
    #[error("unknown CU: {0}")]
    UnknownCu(CuId),
}

impl LookupError {
    pub fn cycle(path: Vec<CuId>) -> Self {
        Self::BreakdownCycle { path }
    }
}

fn render_path(path: &[CuId]) -> String {
    path.iter()
        .map(CuId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
