//! Command-line surface and configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use culookup_ingest::{ColumnLayout, DEFAULT_DATA_DIR, FilePatterns};
use culookup_observability::{DEFAULT_LOG_FILE, LogConfig};

/// Output path of `build` when none is given.
pub const DEFAULT_OUTPUT: &str = "cu_to_sc_mapping.json";

#[derive(Debug, Parser)]
#[command(
    name = "culookup",
    version,
    about = "Flatten CU breakdowns into a stock-code lookup database"
)]
pub struct Cli {
    /// Directory holding the reference CSVs.
    #[arg(long, env = "CULOOKUP_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub patterns: PatternArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// File that log records are appended to.
    #[arg(long, env = "CULOOKUP_LOG_FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,

    /// Log to stderr instead of the log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Use the backup descriptions table for stock codes missing from scdesc.
    #[arg(long, global = true)]
    pub backup_fallback: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Build the CU -> SC database for every CU in the listings (default).
    Build {
        /// Where to write the JSON document.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Case-insensitive search across every listings column.
    Search { query: String },
    /// Show the legend and stock-code breakdown of one CU.
    Show {
        cu: String,
        /// Also export the breakdown as CSV (defaults to `CU_<cu>_breakdown.csv`).
        #[arg(long)]
        csv: Option<Option<PathBuf>>,
    },
}

/// File-name glob patterns; unset ones fall back to the standard export names.
#[derive(Debug, Args)]
pub struct PatternArgs {
    #[arg(long, global = true)]
    pub listings_pattern: Option<String>,
    #[arg(long, global = true)]
    pub breakdowns_pattern: Option<String>,
    #[arg(long, global = true)]
    pub sc_desc_pattern: Option<String>,
    #[arg(long, global = true)]
    pub backup_pattern: Option<String>,
}

impl PatternArgs {
    pub fn to_patterns(&self) -> FilePatterns {
        let defaults = FilePatterns::default();
        FilePatterns {
            listings: self.listings_pattern.clone().unwrap_or(defaults.listings),
            breakdowns: self.breakdowns_pattern.clone().unwrap_or(defaults.breakdowns),
            sc_descriptions: self.sc_desc_pattern.clone().unwrap_or(defaults.sc_descriptions),
            backup_descriptions: self.backup_pattern.clone().unwrap_or(defaults.backup_descriptions),
        }
    }
}

/// Listings header overrides (exports differ in which column holds the CU).
#[derive(Debug, Args)]
pub struct ColumnArgs {
    #[arg(long, global = true)]
    pub listings_cu_column: Option<String>,
    #[arg(long, global = true)]
    pub listings_description_column: Option<String>,
}

impl ColumnArgs {
    pub fn to_layout(&self) -> ColumnLayout {
        let mut layout = ColumnLayout::default();
        if let Some(cu) = &self.listings_cu_column {
            layout.listings.cu = cu.clone();
        }
        if let Some(description) = &self.listings_description_column {
            layout.listings.description = description.clone();
        }
        layout
    }
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        if self.log_stderr {
            LogConfig::stderr()
        } else {
            LogConfig {
                file: Some(self.log_file.clone()),
                ..LogConfig::default()
            }
        }
    }

    /// The requested command, `build` with its defaults when none was given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Build {
            output: PathBuf::from(DEFAULT_OUTPUT),
        })
    }
}
