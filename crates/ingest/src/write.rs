//! Output documents: the JSON mapping and the per-CU CSV report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use culookup_breakdown::{BreakdownLine, CuToScMapping};

use crate::error::{IngestError, IngestResult};

const JSON_INDENT: &[u8] = b"    ";

/// Serialize the mapping as indented JSON with a trailing newline.
///
/// Key order follows the mapping; non-ASCII text is written as-is.
fn write_json<W: Write>(mut writer: W, mapping: &CuToScMapping) -> IngestResult<W> {
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(JSON_INDENT));
    mapping.serialize(&mut ser)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(writer)
}

/// Render the mapping exactly as [`write_mapping`] stores it.
pub fn to_json_string(mapping: &CuToScMapping) -> IngestResult<String> {
    let buf = write_json(Vec::new(), mapping)?;
    Ok(String::from_utf8(buf)?)
}

pub fn write_mapping(path: &Path, mapping: &CuToScMapping) -> IngestResult<()> {
    let file = File::create(path).map_err(|e| IngestError::io(path, e))?;
    write_json(BufWriter::new(file), mapping)?
        .flush()
        .map_err(|e| IngestError::io(path, e))?;
    tracing::debug!(path = %path.display(), cus = mapping.len(), "mapping written");
    Ok(())
}

/// Write report lines as CSV (header row included, blank cells for `None`).
pub fn write_breakdown_csv(path: &Path, lines: &[BreakdownLine]) -> IngestResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IngestError::csv("breakdown report", e))?;
    for line in lines {
        writer
            .serialize(line)
            .map_err(|e| IngestError::csv("breakdown report", e))?;
    }
    writer.flush().map_err(|e| IngestError::io(path, e))?;
    Ok(())
}
