//! CSV -> reference table loading.
//!
//! Identifier normalization happens here, once: Breakdowns CU columns lose
//! their `sc000` prefix and stock codes lose leading zeros. Listings CU values
//! are kept verbatim.

use std::io::Read;
use std::path::Path;

use culookup_breakdown::{
    BackupDescriptionRow, BackupDescriptions, BreakdownRow, BreakdownTable, ListingRow, Listings,
    Quantity, ReferenceTables, ScDescriptionRow, ScDescriptions,
};
use culookup_core::{CuId, StockCode};

use crate::config::{
    BackupColumns, BreakdownColumns, ColumnLayout, ListingsColumns, ScDescriptionColumns,
};
use crate::discover::InputFiles;
use crate::error::{IngestError, IngestResult};

/// Listings columns with this header prefix are spreadsheet export noise.
const UNNAMED_PREFIX: &str = "Unnamed:";

/// A parsed CSV file: header names plus raw records.
#[derive(Debug)]
pub(crate) struct CsvTable {
    name: String,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl CsvTable {
    pub(crate) fn from_path(name: &str, path: &Path) -> IngestResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
        Self::from_reader(name, file)
    }

    pub(crate) fn from_reader<R: Read>(name: &str, reader: R) -> IngestResult<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IngestError::csv(name, e))?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if idx == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let records = reader
            .records()
            .enumerate()
            .map(|(idx, record)| {
                record.map_err(|e| {
                    tracing::debug!(table = name, row = idx + 1, "unreadable CSV row");
                    IngestError::csv(name, e)
                })
            })
            .collect::<IngestResult<Vec<_>>>()?;

        tracing::debug!(table = name, rows = records.len(), "CSV loaded");
        Ok(Self {
            name: name.to_string(),
            headers,
            records,
        })
    }

    fn column(&self, header: &str) -> IngestResult<usize> {
        self.optional_column(header)
            .ok_or_else(|| IngestError::MissingColumn {
                table: self.name.clone(),
                column: header.to_string(),
            })
    }

    fn optional_column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// Non-empty cell text, or `None`.
fn cell(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Load all four tables from discovered paths.
pub fn load_tables(files: &InputFiles, columns: &ColumnLayout) -> IngestResult<ReferenceTables> {
    let listings = listings_from(
        CsvTable::from_path("listings", &files.listings)?,
        &columns.listings,
    )?;
    let breakdowns = breakdowns_from(
        CsvTable::from_path("breakdowns", &files.breakdowns)?,
        &columns.breakdowns,
    )?;
    let sc_descriptions = sc_descriptions_from(
        CsvTable::from_path("sc descriptions", &files.sc_descriptions)?,
        &columns.sc_descriptions,
    )?;
    let backup_descriptions = backup_descriptions_from(
        CsvTable::from_path("backup descriptions", &files.backup_descriptions)?,
        &columns.backup,
    )?;

    tracing::info!(
        listings = listings.rows().len(),
        breakdowns = breakdowns.len(),
        sc_descriptions = sc_descriptions.rows().len(),
        backup_descriptions = backup_descriptions.rows().len(),
        "reference tables loaded"
    );

    Ok(ReferenceTables {
        listings,
        breakdowns,
        sc_descriptions,
        backup_descriptions,
    })
}

pub(crate) fn listings_from(table: CsvTable, columns: &ListingsColumns) -> IngestResult<Listings> {
    let cu_idx = table.column(&columns.cu)?;
    let description_idx = table.column(&columns.description)?;

    let kept: Vec<usize> = (0..table.headers.len())
        .filter(|&i| !table.headers[i].starts_with(UNNAMED_PREFIX))
        .collect();
    let dropped = table.headers.len() - kept.len();
    if dropped > 0 {
        tracing::warn!(table = %table.name, dropped, "dropped unnamed listings columns");
    }

    let headers = kept.iter().map(|&i| table.headers[i].clone()).collect();
    let rows = table
        .records
        .iter()
        .map(|record| ListingRow {
            cu: cell(record, cu_idx).map(CuId::new),
            description: cell(record, description_idx),
            cells: kept.iter().map(|&i| cell(record, i)).collect(),
        })
        .collect();

    Ok(Listings::new(headers, rows))
}

pub(crate) fn breakdowns_from(
    table: CsvTable,
    columns: &BreakdownColumns,
) -> IngestResult<BreakdownTable> {
    let cu_idx = table.column(&columns.cu)?;
    let child_idx = table.column(&columns.child_cu)?;
    let sc_idx = table.column(&columns.stock_code)?;
    let qty_idx = table.column(&columns.quantity)?;

    let mut rows = Vec::with_capacity(table.records.len());
    for (idx, record) in table.records.iter().enumerate() {
        let Some(cu) = cell(record, cu_idx) else {
            tracing::debug!(row = idx + 1, "breakdown row without CU skipped");
            continue;
        };
        rows.push(BreakdownRow {
            cu: CuId::from_reference(&cu),
            child_cu: cell(record, child_idx).map(|c| CuId::from_reference(&c)),
            stock_code: cell(record, sc_idx).map(StockCode::parse),
            quantity: Quantity::from_cell(cell(record, qty_idx)),
        });
    }

    Ok(BreakdownTable::from_rows(rows))
}

pub(crate) fn sc_descriptions_from(
    table: CsvTable,
    columns: &ScDescriptionColumns,
) -> IngestResult<ScDescriptions> {
    let sc_idx = table.column(&columns.stock_code)?;
    let description_idx = table.column(&columns.description)?;
    let price_idx = table.column(&columns.price)?;
    let uoi_idx = table.optional_column(&columns.uoi);

    let rows = table
        .records
        .iter()
        .filter_map(|record| {
            Some(ScDescriptionRow {
                stock_code: cell(record, sc_idx).map(StockCode::parse)?,
                description: cell(record, description_idx),
                price: cell(record, price_idx),
                uoi: uoi_idx.and_then(|i| cell(record, i)),
            })
        })
        .collect();

    Ok(ScDescriptions::from_rows(rows))
}

pub(crate) fn backup_descriptions_from(
    table: CsvTable,
    columns: &BackupColumns,
) -> IngestResult<BackupDescriptions> {
    let sc_idx = table.column(&columns.stock_code)?;
    let description_idx = table.column(&columns.description)?;

    let rows = table
        .records
        .iter()
        .filter_map(|record| {
            Some(BackupDescriptionRow {
                stock_code: cell(record, sc_idx).map(StockCode::parse)?,
                description: cell(record, description_idx),
            })
        })
        .collect();

    Ok(BackupDescriptions::from_rows(rows))
}
