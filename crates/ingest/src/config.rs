//! Input locations and column names.

/// Directory searched for the reference CSVs when none is given.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Glob patterns (relative to the data directory) locating each table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatterns {
    pub listings: String,
    pub breakdowns: String,
    pub sc_descriptions: String,
    pub backup_descriptions: String,
}

impl Default for FilePatterns {
    fn default() -> Self {
        Self {
            listings: "*Yurika*Listings*7-11-2024.csv".to_string(),
            breakdowns: "*Yurika*Breakdowns*7-11-2024.csv".to_string(),
            sc_descriptions: "*scdesc*7-11-2024.csv".to_string(),
            backup_descriptions: "*Backup*Descriptions*.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingsColumns {
    pub cu: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownColumns {
    pub cu: String,
    pub child_cu: String,
    pub stock_code: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScDescriptionColumns {
    pub stock_code: String,
    pub description: String,
    pub price: String,
    /// Optional; a table without it simply has no UOI.
    pub uoi: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupColumns {
    pub stock_code: String,
    pub description: String,
}

/// Header names for every table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub listings: ListingsColumns,
    pub breakdowns: BreakdownColumns,
    pub sc_descriptions: ScDescriptionColumns,
    pub backup: BackupColumns,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            listings: ListingsColumns {
                cu: "CU".to_string(),
                description: "Description".to_string(),
            },
            breakdowns: BreakdownColumns {
                cu: "CU".to_string(),
                child_cu: "CHILD CU".to_string(),
                stock_code: "STOCK CODE".to_string(),
                quantity: "QTY".to_string(),
            },
            sc_descriptions: ScDescriptionColumns {
                stock_code: "Stock Code1".to_string(),
                description: "Description".to_string(),
                price: "Price".to_string(),
                uoi: "UOI".to_string(),
            },
            backup: BackupColumns {
                stock_code: "SC_backup".to_string(),
                description: "backupDescrip".to_string(),
            },
        }
    }
}
