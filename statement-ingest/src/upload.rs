//! Statement "upload". PDFs are not parsed: any `.pdf` resolves to the sample
//! statement. JSON snapshots can be loaded and saved for real data.

use anyhow::{bail, Context, Result};
use statement_core::StatementSnapshot;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::sample::sample_statement;

/// Result of accepting a file for processing
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedStatement {
    pub file_name: String,
    pub snapshot: StatementSnapshot,
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Accept a PDF statement and hand back the extracted data.
///
/// The file itself is never opened. Callers that want the "processing" pause
/// apply it themselves.
pub fn simulate_upload(path: impl AsRef<Path>) -> Result<UploadedStatement> {
    let path = path.as_ref();
    if !is_pdf(path) {
        bail!("Please select a PDF file.");
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!(file = %file_name, "statement upload accepted");
    Ok(UploadedStatement {
        file_name,
        snapshot: sample_statement(),
    })
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<StatementSnapshot> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &StatementSnapshot) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Load whatever the user pointed at: a JSON snapshot, or a PDF (simulated).
pub fn open_statement(path: impl AsRef<Path>) -> Result<StatementSnapshot> {
    let path = path.as_ref();
    if is_pdf(path) {
        return Ok(simulate_upload(path)?.snapshot);
    }
    load_snapshot(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("statement-ingest-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_pdf_upload_returns_sample() {
        let up = simulate_upload("/tmp/statements/November.PDF").unwrap();
        assert_eq!(up.file_name, "November.PDF");
        assert_eq!(up.snapshot, sample_statement());
    }

    #[test]
    fn test_non_pdf_rejected() {
        let err = simulate_upload("statement.csv").unwrap_err();
        assert_eq!(err.to_string(), "Please select a PDF file.");
        assert!(simulate_upload("no_extension").is_err());
    }

    #[test]
    fn test_snapshot_json_roundtrip_on_disk() {
        let path = scratch("snapshot.json");
        save_snapshot(&path, &sample_statement()).unwrap();
        let loaded = open_statement(&path).unwrap();
        assert_eq!(loaded.card_provider, "Major Bank Inc.");
        assert_eq!(loaded.transactions.len(), 9);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_snapshot_has_context() {
        let err = load_snapshot(scratch("missing.json")).unwrap_err();
        assert!(err.to_string().starts_with("read "));
    }
}
