//! CU -> SC database assembly.

use serde::Serialize;
use serde::ser::SerializeMap;

use culookup_core::{CuId, LookupResult, StockCode};

use crate::enricher::Enricher;
use crate::resolver::resolve;
use crate::table::{Quantity, ReferenceTables};

/// One flattened stock code under a CU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLeaf {
    /// Original cell text from the Breakdowns row, not the normalized form.
    #[serde(rename = "Stock Code")]
    pub stock_code: StockCode,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: Quantity,
}

/// Mapping value for one CU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuEntry {
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "SCs")]
    pub stock_codes: Vec<ResolvedLeaf>,
}

/// CU -> entry mapping in Listings first-seen order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuToScMapping {
    entries: Vec<(CuId, CuEntry)>,
}

impl CuToScMapping {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, cu: &CuId) -> Option<&CuEntry> {
        self.entries
            .iter()
            .find(|(id, _)| id == cu)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CuId, &CuEntry)> {
        self.entries.iter().map(|(id, entry)| (id, entry))
    }

    /// Total number of leaves across all CUs.
    pub fn leaf_count(&self) -> usize {
        self.entries.iter().map(|(_, e)| e.stock_codes.len()).sum()
    }
}

impl Serialize for CuToScMapping {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (cu, entry) in &self.entries {
            map.serialize_entry(cu, entry)?;
        }
        map.end()
    }
}

/// Knobs for [`build_database`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fall back to Backup Descriptions for codes missing from the main table.
    pub backup_fallback: bool,
}

/// Build the CU -> SC mapping for every distinct CU in Listings.
///
/// Leaves whose stock code normalizes to nothing (e.g. `"000"`) are left out.
/// Pure: the same tables always produce the same mapping. A breakdown cycle
/// aborts the whole build.
pub fn build_database(tables: &ReferenceTables, options: BuildOptions) -> LookupResult<CuToScMapping> {
    let mut enricher = Enricher::new(&tables.sc_descriptions);
    if options.backup_fallback {
        enricher = enricher.with_backup(&tables.backup_descriptions);
    }

    let mut entries = Vec::new();
    for cu in tables.listings.distinct_cus() {
        let leaves = resolve(cu, &tables.breakdowns)?;

        let stock_codes: Vec<ResolvedLeaf> = leaves
            .into_iter()
            .filter_map(|row| {
                let code = row
                    .stock_code
                    .as_ref()
                    .filter(|code| !code.normalized().is_empty())?;
                let details = enricher.enrich(code);
                tracing::debug!(
                    cu = %cu,
                    stock_code = %code,
                    source = ?details.source,
                    "stock code enriched"
                );
                Some(ResolvedLeaf {
                    stock_code: code.clone(),
                    description: details.description,
                    price: details.price,
                    quantity: row.quantity.clone(),
                })
            })
            .collect();

        let description = tables
            .listings
            .first_for(cu)
            .and_then(|row| row.description.clone());

        tracing::info!(cu = %cu, stock_codes = stock_codes.len(), "processed CU");

        entries.push((
            cu.clone(),
            CuEntry {
                description,
                stock_codes,
            },
        ));
    }

    Ok(CuToScMapping { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enricher::{NO_DESCRIPTION, NO_PRICE};
    use crate::table::{
        BreakdownRow, BreakdownTable, ListingRow, Listings, ScDescriptionRow, ScDescriptions,
    };
    use culookup_core::LookupError;

    fn listing(cu: &str, description: &str) -> ListingRow {
        ListingRow {
            cu: Some(CuId::new(cu)),
            description: Some(description.to_string()),
            cells: vec![Some(cu.to_string()), Some(description.to_string())],
        }
    }

    fn row(cu: &str, child: Option<&str>, sc: Option<&str>, qty: Option<&str>) -> BreakdownRow {
        BreakdownRow {
            cu: CuId::from_reference(cu),
            child_cu: child.map(CuId::from_reference),
            stock_code: sc.map(StockCode::parse),
            quantity: Quantity::from_cell(qty.map(str::to_string)),
        }
    }

    fn widget_tables() -> ReferenceTables {
        ReferenceTables {
            listings: Listings::new(
                vec!["CU".into(), "Description".into()],
                vec![listing("A1", "Widget")],
            ),
            breakdowns: BreakdownTable::from_rows(vec![
                row("A1", Some("B2"), None, None),
                row("B2", None, Some("007"), Some("3")),
            ]),
            sc_descriptions: ScDescriptions::from_rows(vec![ScDescriptionRow {
                stock_code: StockCode::parse("7"),
                description: Some("Bolt".into()),
                price: Some("0.50".into()),
                uoi: None,
            }]),
            ..ReferenceTables::default()
        }
    }

    #[test]
    fn widget_example_matches_expected_document() {
        let mapping = build_database(&widget_tables(), BuildOptions::default()).unwrap();
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "A1": {
                    "Description": "Widget",
                    "SCs": [{
                        "Stock Code": "007",
                        "Description": "Bolt",
                        "Price": "0.50",
                        "Quantity": "3"
                    }]
                }
            })
        );
    }

    #[test]
    fn one_entry_per_distinct_cu_first_description_wins() {
        let mut tables = widget_tables();
        tables.listings = Listings::new(
            vec!["CU".into(), "Description".into()],
            vec![
                listing("Z9", "Zed"),
                listing("A1", "Widget"),
                listing("Z9", "Zed again"),
            ],
        );
        let mapping = build_database(&tables, BuildOptions::default()).unwrap();
        assert_eq!(mapping.len(), 2);
        let keys: Vec<&str> = mapping.iter().map(|(cu, _)| cu.as_str()).collect();
        assert_eq!(keys, vec!["Z9", "A1"]);
        let zed = mapping.get(&CuId::new("Z9")).unwrap();
        assert_eq!(zed.description.as_deref(), Some("Zed"));
        assert!(zed.stock_codes.is_empty());
    }

    #[test]
    fn missing_quantity_defaults_and_missing_code_gets_sentinels() {
        let mut tables = widget_tables();
        tables.breakdowns = BreakdownTable::from_rows(vec![row("A1", None, Some("555"), None)]);
        let mapping = build_database(&tables, BuildOptions::default()).unwrap();
        let leaf = &mapping.get(&CuId::new("A1")).unwrap().stock_codes[0];
        assert_eq!(leaf.quantity, Quantity::Defaulted);
        assert_eq!(leaf.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(leaf.price.as_deref(), Some(NO_PRICE));
    }

    #[test]
    fn prefixed_listing_cu_is_not_normalized() {
        let mut tables = widget_tables();
        tables.listings = Listings::new(
            vec!["CU".into(), "Description".into()],
            vec![listing("SC000A1", "Prefixed")],
        );
        tables.breakdowns = BreakdownTable::from_rows(vec![row("SC000A1", None, Some("7"), None)]);
        let mapping = build_database(&tables, BuildOptions::default()).unwrap();
        // Breakdowns now key on "A1" while Listings still says "SC000A1".
        let entry = mapping.get(&CuId::new("SC000A1")).unwrap();
        assert!(entry.stock_codes.is_empty());
    }

    #[test]
    fn all_zero_stock_code_is_not_emitted() {
        let mut tables = widget_tables();
        tables.breakdowns = BreakdownTable::from_rows(vec![
            row("A1", None, Some("000"), None),
            row("A1", Some("B2"), None, None),
            row("B2", None, Some("007"), Some("3")),
        ]);
        let mapping = build_database(&tables, BuildOptions::default()).unwrap();
        let codes: Vec<&str> = mapping
            .get(&CuId::new("A1"))
            .unwrap()
            .stock_codes
            .iter()
            .map(|leaf| leaf.stock_code.original())
            .collect();
        assert_eq!(codes, vec!["007"]);
    }

    #[test]
    fn cu_with_only_an_all_zero_leaf_has_no_stock_codes() {
        let mut tables = widget_tables();
        tables.breakdowns = BreakdownTable::from_rows(vec![row("A1", None, Some("000"), None)]);
        let mapping = build_database(&tables, BuildOptions::default()).unwrap();
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"A1": {"Description": "Widget", "SCs": []}})
        );
    }

    #[test]
    fn cycle_aborts_the_build() {
        let mut tables = widget_tables();
        tables.breakdowns = BreakdownTable::from_rows(vec![
            row("A1", Some("B2"), None, None),
            row("B2", Some("A1"), None, None),
        ]);
        let err = build_database(&tables, BuildOptions::default()).unwrap_err();
        assert!(matches!(err, LookupError::BreakdownCycle { .. }));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let tables = widget_tables();
        let first = serde_json::to_string(&build_database(&tables, BuildOptions::default()).unwrap()).unwrap();
        let second = serde_json::to_string(&build_database(&tables, BuildOptions::default()).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
