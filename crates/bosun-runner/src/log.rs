use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use bosun_core::CaseRecord;

/// Raw-log ingestion failures are fatal: the gatekeeper must not certify a
/// run it could not read in full.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("results log not found: {path}")]
    Missing { path: String },
    #[error("malformed record at {path}:{line}: {source}")]
    Malformed {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read the whole newline-delimited results log. Blank lines are ignored;
/// any unparsable line aborts with its line number.
pub fn read_raw_log(path: &Path) -> Result<Vec<CaseRecord>> {
    if !path.exists() {
        return Err(LogError::Missing { path: path.display().to_string() }.into());
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let rec: CaseRecord = serde_json::from_str(line).map_err(|source| LogError::Malformed {
            path: path.display().to_string(),
            line: idx + 1,
            source,
        })?;
        records.push(rec);
    }
    Ok(records)
}

/// Write validated records as one JSON object per line, in input order.
/// Serialization is deterministic, so identical input yields byte-identical
/// output.
pub fn write_validated_log(path: &Path, records: &[CaseRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    let mut buf = Vec::new();
    for rec in records {
        serde_json::to_writer(&mut buf, rec)?;
        buf.push(b'\n');
    }
    let mut f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    f.write_all(&buf).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
