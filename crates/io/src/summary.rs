//! Batch summary CSV.
//!
//! One row per processed document. Column order is fixed; serialized by
//! serde in struct field order, so two runs over the same reports produce
//! byte-identical output.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tally_engine::StatementReport;

use crate::error::ReportError;

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    file: &'a str,
    starting_balance: f64,
    ending_balance: f64,
    transactions: usize,
}

/// Write `summary.csv` into `dir`. Header is always written, even with
/// zero reports.
pub fn write_summary_csv(dir: &Path, reports: &[StatementReport]) -> Result<PathBuf, ReportError> {
    let path = dir.join("summary.csv");
    let file = std::fs::File::create(&path)
        .map_err(|e| ReportError::Io(format!("cannot create {}: {}", path.display(), e)))?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(std::io::BufWriter::new(file));

    if reports.is_empty() {
        writer
            .write_record(["file", "starting_balance", "ending_balance", "transactions"])
            .map_err(|e| ReportError::Serialize(e.to_string()))?;
    }
    for report in reports {
        writer
            .serialize(SummaryRow {
                file: &report.meta.file,
                starting_balance: report.reconciliation.starting_balance,
                ending_balance: report.reconciliation.ending_balance,
                transactions: report.transactions.len(),
            })
            .map_err(|e| ReportError::Serialize(e.to_string()))?;
    }
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use crate::testutil::report;

    use super::*;

    #[test]
    fn rows_in_input_order_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let reports = vec![report("feb.pdf", 100.0, 150.0), report("jan.pdf", 50.0, 100.0)];

        let path = write_summary_csv(dir.path(), &reports).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();

        assert_eq!(
            contents,
            "file,starting_balance,ending_balance,transactions\n\
             feb.pdf,100.0,150.0,0\n\
             jan.pdf,50.0,100.0,0\n"
        );
    }

    #[test]
    fn empty_batch_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_summary_csv(dir.path(), &[]).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "file,starting_balance,ending_balance,transactions\n");
    }

    #[test]
    fn quotes_file_names_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_summary_csv(dir.path(), &[report("a,b.pdf", 0.0, 0.0)]).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"a,b.pdf\""));
    }
}
