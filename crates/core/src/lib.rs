//! `culookup-core` — identifier and error building blocks.
//!
//! This crate contains **pure** primitives shared by the breakdown engine and
//! the ingestion layer (no IO, no CSV, no logging setup).

pub mod error;
pub mod id;
pub mod normalize;
pub mod value_object;

pub use error::{LookupError, LookupResult};
pub use id::{CuId, StockCode};
pub use normalize::{CU_REFERENCE_PREFIX, normalize_cu_reference, normalize_stock_code};
pub use value_object::ValueObject;
