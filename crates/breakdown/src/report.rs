//! Single-CU report: the Listings legend plus a detailed breakdown.

use serde::Serialize;

use culookup_core::{CuId, LookupError, LookupResult};

use crate::enricher::Enricher;
use crate::resolver::resolve;
use crate::table::{ListingRow, ReferenceTables};

/// One row of a CU breakdown report.
///
/// Field order is the CSV column order of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    #[serde(rename = "CU")]
    pub cu: String,
    #[serde(rename = "CHILD CU")]
    pub child_cu: Option<String>,
    #[serde(rename = "STOCK CODE")]
    pub stock_code: String,
    #[serde(rename = "QTY")]
    pub quantity: String,
    #[serde(rename = "SC Description")]
    pub description: Option<String>,
    #[serde(rename = "UOI")]
    pub uoi: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
}

/// Every Listings row describing `cu`.
pub fn legend<'a>(tables: &'a ReferenceTables, cu: &'a CuId) -> Vec<&'a ListingRow> {
    tables.listings.rows_for(cu).collect()
}

/// Resolve `cu` and attach stock-code details to every leaf.
///
/// The `CU` column carries the leaf row's own parent, so nested expansions
/// show which sub-unit each stock code came from.
pub fn breakdown_lines(
    tables: &ReferenceTables,
    cu: &CuId,
    enricher: &Enricher<'_>,
) -> LookupResult<Vec<BreakdownLine>> {
    if !tables.breakdowns.contains(cu) && tables.listings.first_for(cu).is_none() {
        return Err(LookupError::UnknownCu(cu.clone()));
    }

    let lines = resolve(cu, &tables.breakdowns)?
        .into_iter()
        .filter_map(|row| {
            let code = row
                .stock_code
                .as_ref()
                .filter(|code| !code.normalized().is_empty())?;
            let details = enricher.enrich(code);
            Some(BreakdownLine {
                cu: row.cu.to_string(),
                child_cu: row.child_cu.as_ref().map(CuId::to_string),
                stock_code: code.normalized().to_string(),
                quantity: row.quantity.to_string(),
                description: details.description,
                uoi: details.uoi,
                price: details.price,
            })
        })
        .collect();
    Ok(lines)
}
