//! Value object trait: equality by value, not identity.
//!
//! Identifiers in this lookup carry no identity beyond their text: two
//! `StockCode`s built from the same cell are the same code.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Lookup tables
/// clone them freely into resolved output, so they must stay cheap to copy
/// and debuggable in log output.
///
/// ```ignore
/// let a = StockCode::parse("007");
/// let b = StockCode::parse("007");
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
