//! Per-statement JSON export.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tally_engine::model::{BalanceSource, ReconciliationResult, TransactionRecord};
use tally_engine::StatementReport;

use crate::error::ReportError;

#[derive(Debug, Serialize)]
struct JsonStatement<'a> {
    starting_balance: f64,
    starting_source: BalanceSource,
    ending_balance: f64,
    ending_source: BalanceSource,
    transactions: &'a [TransactionRecord],
    reconciliation: &'a ReconciliationResult,
}

/// Write `statements.json` into `dir`: a map from document name to its
/// balances, transactions, and reconciliation, pretty-printed with a
/// trailing newline. BTreeMap keying keeps the output deterministic
/// regardless of processing order.
pub fn write_statements_json(
    dir: &Path,
    reports: &[StatementReport],
) -> Result<PathBuf, ReportError> {
    let map: BTreeMap<&str, JsonStatement<'_>> = reports
        .iter()
        .map(|r| {
            (
                r.meta.file.as_str(),
                JsonStatement {
                    starting_balance: r.reconciliation.starting_balance,
                    starting_source: r.starting_source,
                    ending_balance: r.reconciliation.ending_balance,
                    ending_source: r.ending_source,
                    transactions: &r.transactions,
                    reconciliation: &r.reconciliation,
                },
            )
        })
        .collect();

    let mut body =
        serde_json::to_vec_pretty(&map).map_err(|e| ReportError::Serialize(e.to_string()))?;
    body.push(b'\n');

    let path = dir.join("statements.json");
    std::fs::write(&path, body)
        .map_err(|e| ReportError::Io(format!("cannot write {}: {}", path.display(), e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use crate::testutil::{report, report_with_transactions, txn};

    use super::*;

    #[test]
    fn keys_are_sorted_and_payload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let reports = vec![
            report_with_transactions("zeta.pdf", 10.0, 30.0, vec![txn("01/02", "Deposit", 20.0)]),
            report("alpha.pdf", 5.0, 5.0),
        ];

        let path = write_statements_json(dir.path(), &reports).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.ends_with('\n'));

        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["alpha.pdf", "zeta.pdf"]);

        let zeta = &json["zeta.pdf"];
        assert_eq!(zeta["starting_balance"], 10.0);
        assert_eq!(zeta["starting_source"], "key_value");
        assert_eq!(zeta["transactions"][0]["description"], "Deposit");
        assert_eq!(zeta["transactions"][0]["direction"], "credit");
        assert_eq!(zeta["reconciliation"]["is_discrepant"], false);
    }

    #[test]
    fn empty_batch_is_an_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_statements_json(dir.path(), &[]).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}\n");
    }
}
