//! CU breakdown engine.
//!
//! This crate contains the lookup rules (flattening composite units into
//! stock codes, enriching them, assembling the mapping) implemented purely as
//! deterministic logic over in-memory tables (no file IO, no CSV parsing).

pub mod database;
pub mod enricher;
pub mod report;
pub mod resolver;
pub mod search;
pub mod table;

pub use database::{BuildOptions, CuEntry, CuToScMapping, ResolvedLeaf, build_database};
pub use enricher::{DetailSource, Enricher, Enrichment, NO_DESCRIPTION, NO_PRICE};
pub use report::{BreakdownLine, breakdown_lines, legend};
pub use resolver::resolve;
pub use search::search_listings;
pub use table::{
    BackupDescriptionRow, BackupDescriptions, BreakdownRow, BreakdownTable, ListingRow, Listings,
    Quantity, ReferenceTables, RowKind, ScDescriptionRow, ScDescriptions,
};
