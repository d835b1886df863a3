//! Locate the reference CSVs inside a data directory.

use std::path::{Path, PathBuf};

use crate::config::FilePatterns;
use crate::error::{IngestError, IngestResult};

/// Resolved paths of the four reference tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub listings: PathBuf,
    pub breakdowns: PathBuf,
    pub sc_descriptions: PathBuf,
    pub backup_descriptions: PathBuf,
}

/// Find every table in `data_dir`, taking the first match of each pattern.
///
/// All patterns are checked before failing so the error names every missing
/// table at once.
pub fn discover(data_dir: &Path, patterns: &FilePatterns) -> IngestResult<InputFiles> {
    let listings = first_match(data_dir, &patterns.listings)?;
    let breakdowns = first_match(data_dir, &patterns.breakdowns)?;
    let sc_descriptions = first_match(data_dir, &patterns.sc_descriptions)?;
    let backup_descriptions = first_match(data_dir, &patterns.backup_descriptions)?;

    match (listings, breakdowns, sc_descriptions, backup_descriptions) {
        (Some(listings), Some(breakdowns), Some(sc_descriptions), Some(backup_descriptions)) => {
            let files = InputFiles {
                listings,
                breakdowns,
                sc_descriptions,
                backup_descriptions,
            };
            tracing::debug!(?files, "input files discovered");
            Ok(files)
        }
        (l, b, s, k) => {
            let tables = [
                (l.is_none(), &patterns.listings),
                (b.is_none(), &patterns.breakdowns),
                (s.is_none(), &patterns.sc_descriptions),
                (k.is_none(), &patterns.backup_descriptions),
            ]
            .into_iter()
            .filter(|(missing, _)| *missing)
            .map(|(_, pattern)| pattern.clone())
            .collect();
            Err(IngestError::MissingInput {
                dir: data_dir.to_path_buf(),
                tables,
            })
        }
    }
}

fn first_match(dir: &Path, pattern: &str) -> IngestResult<Option<PathBuf>> {
    // Escape the directory so only the file-name pattern is interpreted.
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped_dir).join(pattern);
    let found = glob::glob(&full.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!(path = %e.path().display(), error = %e, "unreadable path skipped");
                None
            }
        })
        .find(|path| path.is_file());
    Ok(found)
}
