//! `culookup-ingest` — file-side collaborators of the breakdown engine.
//!
//! Finds the reference CSVs by name pattern, loads them into
//! `culookup-breakdown` tables (normalizing identifiers on the way in), and
//! writes the resulting mapping and per-CU reports back out.

pub mod config;
pub mod discover;
pub mod error;
pub mod load;
pub mod write;

pub use config::{ColumnLayout, DEFAULT_DATA_DIR, FilePatterns};
pub use discover::{InputFiles, discover};
pub use error::{IngestError, IngestResult};
pub use load::load_tables;
pub use write::{to_json_string, write_breakdown_csv, write_mapping};
