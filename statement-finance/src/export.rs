//! CSV export of statement transactions.
//!
//! Columns: date,description,amount,category

use anyhow::{Context, Result};
use serde::Serialize;
use statement_core::Transaction;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: &'a str,
    description: &'a str,
    amount: String,
    category: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            date: &t.date,
            description: &t.description,
            amount: format!("{:.2}", t.amount),
            category: t.category.as_deref().unwrap_or(""),
        }
    }
}

/// Write transactions as CSV, header included even when empty.
pub fn export_csv<W: Write>(txns: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["date", "description", "amount", "category"])?;
    for t in txns {
        wtr.serialize(CsvRow::from(t))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv_path(txns: &[Transaction], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    export_csv(txns, file).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), count = txns.len(), "exported transactions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(txns: &[Transaction]) -> String {
        let mut buf = Vec::new();
        export_csv(txns, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render(&[]), "date,description,amount,category\n");
    }

    #[test]
    fn test_rows_and_quoting() {
        let txns = vec![
            Transaction::new("11-12", "PAYMENT RECEIVED - THANK YOU", 1600.0, Some("Payment")),
            Transaction::new("11-13", "Tacos, Inc.", -3.5, None),
        ];
        let out = render(&txns);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "11-12,PAYMENT RECEIVED - THANK YOU,1600.00,Payment");
        assert_eq!(lines[2], "11-13,\"Tacos, Inc.\",-3.50,");
    }
}
