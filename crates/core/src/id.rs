//! Strongly-typed identifiers used across the lookup.

use serde::Serialize;

use crate::normalize::{normalize_cu_reference, normalize_stock_code};
use crate::value_object::ValueObject;

/// Identifier of a composite unit (CU).
///
/// Two constructors exist on purpose: Listings identifiers are taken verbatim,
/// Breakdowns identifiers go through [`normalize_cu_reference`]. Matching is a
/// plain string comparison between the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CuId(String);

impl CuId {
    /// Take the identifier verbatim (Listings column).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Take the identifier from a Breakdowns cell, stripping the `sc000` prefix.
    pub fn from_reference(raw: &str) -> Self {
        Self(normalize_cu_reference(raw).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CuId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for CuId {}

/// Stock code (SC) as read from a table cell.
///
/// Keeps the original text for output and the zero-stripped form for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockCode {
    original: String,
    normalized: String,
}

impl StockCode {
    pub fn parse(raw: impl Into<String>) -> Self {
        let original = raw.into();
        let normalized = normalize_stock_code(&original).to_string();
        Self {
            original,
            normalized,
        }
    }

    /// The cell text exactly as it appeared in the source table.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Leading zeros stripped; an all-zero code becomes the empty string.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl core::fmt::Display for StockCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for StockCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl ValueObject for StockCode {}
