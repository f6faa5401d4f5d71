//! Free-text discrepancy report.

use std::path::{Path, PathBuf};

use tally_engine::StatementReport;

use crate::error::ReportError;

const HEADER: &str = "Bank Statement Discrepancy Report";

/// Write `discrepancy_report.txt` into `dir`: one block per discrepant
/// document, or a single "none found" line when the batch is clean.
pub fn write_discrepancy_report(
    dir: &Path,
    reports: &[StatementReport],
) -> Result<PathBuf, ReportError> {
    let mut body = String::new();
    body.push_str(HEADER);
    body.push('\n');
    body.push_str(&"=".repeat(HEADER.len()));
    body.push_str("\n\n");

    let discrepant: Vec<&StatementReport> =
        reports.iter().filter(|r| r.reconciliation.is_discrepant).collect();

    if discrepant.is_empty() {
        body.push_str("No discrepancies found in any statements.\n");
    } else {
        for report in discrepant {
            let r = &report.reconciliation;
            body.push_str(&format!("File: {}\n", report.meta.file));
            body.push_str(&format!("  Starting Balance:   {}\n", format_money(r.starting_balance)));
            body.push_str(&format!("  Total Transactions: {}\n", format_money(r.total_transactions)));
            body.push_str(&format!("  Expected Ending:    {}\n", format_money(r.expected_ending)));
            body.push_str(&format!("  Actual Ending:      {}\n", format_money(r.actual_ending)));
            body.push_str(&format!("  Variance:           {}\n", format_money(r.variance)));
            body.push('\n');
        }
    }

    let path = dir.join("discrepancy_report.txt");
    std::fs::write(&path, body)
        .map_err(|e| ReportError::Io(format!("cannot write {}: {}", path.display(), e)))?;

    Ok(path)
}

/// Dollar formatting with thousands separators, sign inside the currency
/// symbol: -1234.5 renders as "$-1,234.50".
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let whole = (cents.abs() / 100).to_string();
    let frac = cents.abs() % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${sign}{grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use crate::testutil::report;

    use super::*;

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(5.5), "$5.50");
        assert_eq!(format_money(1000.0), "$1,000.00");
        assert_eq!(format_money(1234567.89), "$1,234,567.89");
        assert_eq!(format_money(-1234.5), "$-1,234.50");
        assert_eq!(format_money(-0.004), "$0.00");
    }

    #[test]
    fn clean_batch_reports_none_found() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write_discrepancy_report(dir.path(), &[report("jan.pdf", 100.0, 100.0)]).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("Bank Statement Discrepancy Report\n====="));
        assert!(contents.contains("No discrepancies found in any statements."));
        assert!(!contents.contains("File:"));
    }

    #[test]
    fn discrepant_documents_each_get_a_block() {
        let dir = tempfile::tempdir().unwrap();
        let reports = vec![
            report("jan.pdf", 1000.0, 1150.0),
            report("feb.pdf", 50.0, 50.0),
            report("mar.pdf", 0.0, -25.0),
        ];

        let path = write_discrepancy_report(dir.path(), &reports).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();

        assert!(contents.contains("File: jan.pdf"));
        assert!(contents.contains("  Variance:           $150.00"));
        assert!(contents.contains("File: mar.pdf"));
        assert!(contents.contains("  Variance:           $-25.00"));
        assert!(!contents.contains("File: feb.pdf"));
    }
}
