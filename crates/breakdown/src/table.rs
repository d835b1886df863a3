//! In-memory reference tables.
//!
//! Rows arrive already parsed and normalized; tables only index them. Cells
//! that were empty in the source are `None`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use culookup_core::{CuId, StockCode, ValueObject};

/// Quantity of a breakdown row.
///
/// The cell text is kept verbatim; an empty cell counts as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Quantity {
    Stated(String),
    Defaulted,
}

impl Quantity {
    pub fn from_cell(cell: Option<String>) -> Self {
        match cell {
            Some(text) => Self::Stated(text),
            None => Self::Defaulted,
        }
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Quantity::Stated(text) => f.write_str(text),
            Quantity::Defaulted => f.write_str("1"),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Stated(text) => serializer.serialize_str(text),
            Quantity::Defaulted => serializer.serialize_u8(1),
        }
    }
}

impl ValueObject for Quantity {}

/// One Listings row: the CU it describes plus every retained column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub cu: Option<CuId>,
    pub description: Option<String>,
    /// All retained cells, aligned with [`Listings::headers`].
    pub cells: Vec<Option<String>>,
}

/// Listings table (CU -> top-level description).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listings {
    headers: Vec<String>,
    rows: Vec<ListingRow>,
}

impl Listings {
    pub fn new(headers: Vec<String>, rows: Vec<ListingRow>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// Distinct CU identifiers in first-seen order. Rows without a CU are skipped.
    pub fn distinct_cus(&self) -> Vec<&CuId> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.cu.as_ref())
            .filter(|cu| seen.insert(*cu))
            .collect()
    }

    /// First row whose CU equals `cu` exactly.
    pub fn first_for(&self, cu: &CuId) -> Option<&ListingRow> {
        self.rows.iter().find(|row| row.cu.as_ref() == Some(cu))
    }

    pub fn rows_for<'a>(&'a self, cu: &'a CuId) -> impl Iterator<Item = &'a ListingRow> + 'a {
        self.rows.iter().filter(move |row| row.cu.as_ref() == Some(cu))
    }
}

/// Classification of a breakdown row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'a> {
    /// Carries a stock code; terminates expansion.
    Leaf(&'a StockCode),
    /// Names a child CU and no stock code; expanded further.
    Internal(&'a CuId),
    /// Neither; contributes nothing.
    Inert,
}

/// One Breakdowns row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub cu: CuId,
    pub child_cu: Option<CuId>,
    pub stock_code: Option<StockCode>,
    pub quantity: Quantity,
}

impl BreakdownRow {
    /// A stock code wins over a child CU.
    pub fn kind(&self) -> RowKind<'_> {
        match (&self.stock_code, &self.child_cu) {
            (Some(sc), _) => RowKind::Leaf(sc),
            (None, Some(child)) => RowKind::Internal(child),
            (None, None) => RowKind::Inert,
        }
    }
}

/// Breakdowns table, indexed by parent CU while keeping source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakdownTable {
    rows: Vec<BreakdownRow>,
    by_parent: HashMap<CuId, Vec<usize>>,
}

impl BreakdownTable {
    pub fn from_rows(rows: Vec<BreakdownRow>) -> Self {
        let mut by_parent: HashMap<CuId, Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_parent.entry(row.cu.clone()).or_default().push(idx);
        }
        Self { rows, by_parent }
    }

    pub fn rows(&self) -> &[BreakdownRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, cu: &CuId) -> bool {
        self.by_parent.contains_key(cu)
    }

    /// Rows whose parent is `cu`, in table order.
    pub fn children_of(&self, cu: &CuId) -> Vec<&BreakdownRow> {
        self.by_parent
            .get(cu)
            .map(|idxs| idxs.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }
}

/// One Stock-Code Descriptions row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScDescriptionRow {
    pub stock_code: StockCode,
    pub description: Option<String>,
    pub price: Option<String>,
    pub uoi: Option<String>,
}

/// Stock-Code Descriptions table; the first row per normalized code wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScDescriptions {
    rows: Vec<ScDescriptionRow>,
    first_by_code: HashMap<String, usize>,
}

impl ScDescriptions {
    pub fn from_rows(rows: Vec<ScDescriptionRow>) -> Self {
        let mut first_by_code = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            first_by_code
                .entry(row.stock_code.normalized().to_string())
                .or_insert(idx);
        }
        Self {
            rows,
            first_by_code,
        }
    }

    pub fn rows(&self) -> &[ScDescriptionRow] {
        &self.rows
    }

    pub fn find(&self, code: &StockCode) -> Option<&ScDescriptionRow> {
        self.first_by_code
            .get(code.normalized())
            .map(|&i| &self.rows[i])
    }
}

/// One Backup Descriptions row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupDescriptionRow {
    pub stock_code: StockCode,
    pub description: Option<String>,
}

/// Backup Descriptions table. Only consulted when backup fallback is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupDescriptions {
    rows: Vec<BackupDescriptionRow>,
    first_by_code: HashMap<String, usize>,
}

impl BackupDescriptions {
    pub fn from_rows(rows: Vec<BackupDescriptionRow>) -> Self {
        let mut first_by_code = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            first_by_code
                .entry(row.stock_code.normalized().to_string())
                .or_insert(idx);
        }
        Self {
            rows,
            first_by_code,
        }
    }

    pub fn rows(&self) -> &[BackupDescriptionRow] {
        &self.rows
    }

    pub fn find(&self, code: &StockCode) -> Option<&BackupDescriptionRow> {
        self.first_by_code
            .get(code.normalized())
            .map(|&i| &self.rows[i])
    }
}

/// The four reference tables, loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTables {
    pub listings: Listings,
    pub breakdowns: BreakdownTable,
    pub sc_descriptions: ScDescriptions,
    pub backup_descriptions: BackupDescriptions,
}
