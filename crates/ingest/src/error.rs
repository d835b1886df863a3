//! Ingestion error model.

use std::path::PathBuf;

use thiserror::Error;

use culookup_core::LookupError;

pub type IngestResult<T> = Result<T, IngestError>;

/// Failures reading inputs or writing outputs.
///
/// Everything here is detected before (or after) the breakdown engine runs;
/// the engine itself only reports [`LookupError`].
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no file matching {} in {}", .tables.join(", "), .dir.display())]
    MissingInput { dir: PathBuf, tables: Vec<String> },

    #[error("{table}: missing required column {column:?}")]
    MissingColumn { table: String, column: String },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read {table}: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialized output is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl IngestError {
    pub fn csv(table: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            table: table.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
