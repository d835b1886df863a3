//! Stock-code detail lookup (description, price, UOI).

use culookup_core::StockCode;

use crate::table::{BackupDescriptions, ScDescriptions};

/// Description emitted when no reference row matches a stock code.
pub const NO_DESCRIPTION: &str = "No Description Found";

/// Price emitted when no reference row supplies one.
pub const NO_PRICE: &str = "No Price Found";

/// Where an [`Enrichment`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSource {
    StockCodeTable,
    BackupTable,
    NotFound,
}

/// Details attached to a resolved stock code.
///
/// A matched row with a blank cell yields `None` for that field; the
/// sentinels are reserved for codes with no matching row at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub description: Option<String>,
    pub price: Option<String>,
    pub uoi: Option<String>,
    pub source: DetailSource,
}

impl Enrichment {
    fn not_found() -> Self {
        Self {
            description: Some(NO_DESCRIPTION.to_string()),
            price: Some(NO_PRICE.to_string()),
            uoi: None,
            source: DetailSource::NotFound,
        }
    }
}

/// Looks stock codes up in the descriptions table.
#[derive(Debug, Clone, Copy)]
pub struct Enricher<'a> {
    sc_descriptions: &'a ScDescriptions,
    backup: Option<&'a BackupDescriptions>,
}

impl<'a> Enricher<'a> {
    pub fn new(sc_descriptions: &'a ScDescriptions) -> Self {
        Self {
            sc_descriptions,
            backup: None,
        }
    }

    /// Consult `backup` for a description when the main table has no row.
    pub fn with_backup(mut self, backup: &'a BackupDescriptions) -> Self {
        self.backup = Some(backup);
        self
    }

    pub fn enrich(&self, code: &StockCode) -> Enrichment {
        if let Some(row) = self.sc_descriptions.find(code) {
            return Enrichment {
                description: row.description.clone(),
                price: row.price.clone(),
                uoi: row.uoi.clone(),
                source: DetailSource::StockCodeTable,
            };
        }

        if let Some(row) = self.backup.and_then(|b| b.find(code)) {
            tracing::debug!(stock_code = %code, "description taken from backup table");
            return Enrichment {
                description: row.description.clone(),
                source: DetailSource::BackupTable,
                ..Enrichment::not_found()
            };
        }

        Enrichment::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{BackupDescriptionRow, ScDescriptionRow};

    fn sc_table() -> ScDescriptions {
        ScDescriptions::from_rows(vec![
            ScDescriptionRow {
                stock_code: StockCode::parse("7"),
                description: Some("Bolt".into()),
                price: Some("0.50".into()),
                uoi: Some("EA".into()),
            },
            ScDescriptionRow {
                stock_code: StockCode::parse("8"),
                description: None,
                price: None,
                uoi: None,
            },
        ])
    }

    fn backup_table() -> BackupDescriptions {
        BackupDescriptions::from_rows(vec![BackupDescriptionRow {
            stock_code: StockCode::parse("0055"),
            description: Some("Washer (legacy)".into()),
        }])
    }

    #[test]
    fn found_row_is_returned_verbatim() {
        let table = sc_table();
        let e = Enricher::new(&table).enrich(&StockCode::parse("007"));
        assert_eq!(e.description.as_deref(), Some("Bolt"));
        assert_eq!(e.price.as_deref(), Some("0.50"));
        assert_eq!(e.uoi.as_deref(), Some("EA"));
        assert_eq!(e.source, DetailSource::StockCodeTable);
    }

    #[test]
    fn missing_code_gets_sentinels() {
        let table = sc_table();
        let e = Enricher::new(&table).enrich(&StockCode::parse("123"));
        assert_eq!(e.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(e.price.as_deref(), Some(NO_PRICE));
        assert_eq!(e.source, DetailSource::NotFound);
    }

    #[test]
    fn blank_cells_on_a_matched_row_stay_blank() {
        let table = sc_table();
        let e = Enricher::new(&table).enrich(&StockCode::parse("8"));
        assert_eq!(e.description, None);
        assert_eq!(e.price, None);
    }

    #[test]
    fn backup_is_ignored_unless_enabled() {
        let table = sc_table();
        let e = Enricher::new(&table).enrich(&StockCode::parse("55"));
        assert_eq!(e.description.as_deref(), Some(NO_DESCRIPTION));
    }

    #[test]
    fn backup_supplies_description_but_not_price() {
        let table = sc_table();
        let backup = backup_table();
        let e = Enricher::new(&table)
            .with_backup(&backup)
            .enrich(&StockCode::parse("55"));
        assert_eq!(e.description.as_deref(), Some("Washer (legacy)"));
        assert_eq!(e.price.as_deref(), Some(NO_PRICE));
        assert_eq!(e.source, DetailSource::BackupTable);
    }
}
