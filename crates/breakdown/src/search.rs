//! Free-text search over Listings.

use crate::table::{ListingRow, Listings};

/// Rows where any retained cell contains `query`, ignoring case.
///
/// An empty query matches every row.
pub fn search_listings<'a>(listings: &'a Listings, query: &str) -> Vec<&'a ListingRow> {
    if query.is_empty() {
        return listings.rows().iter().collect();
    }
    let needle = query.to_lowercase();
    listings
        .rows()
        .iter()
        .filter(|row| {
            row.cells
                .iter()
                .flatten()
                .any(|cell| cell.to_lowercase().contains(&needle))
        })
        .collect()
}
