//! Pipeline entry points: reconcile arithmetic and the per-document run.

use crate::balance::resolve_balances;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::extract::extract_transactions;
use crate::labels::LabelMatcher;
use crate::model::{
    BalanceSource, Direction, ReconciliationResult, ReportMeta, StatementReport,
    StructuredDocument, TransactionRecord,
};

/// Compute net flow, expected ending balance, variance, and the discrepancy
/// flag. Pure arithmetic; never fails on finite input.
pub fn reconcile(
    starting_balance: f64,
    ending_balance: f64,
    transactions: &[TransactionRecord],
    tolerance: f64,
) -> ReconciliationResult {
    let total_transactions: f64 = transactions
        .iter()
        .map(|t| match t.direction {
            Direction::Credit => t.amount,
            Direction::Debit => -t.amount,
        })
        .sum();

    let expected_ending = starting_balance + total_transactions;
    let variance = ending_balance - expected_ending;

    ReconciliationResult {
        starting_balance,
        ending_balance,
        total_transactions,
        expected_ending,
        actual_ending: ending_balance,
        variance,
        is_discrepant: variance.abs() > tolerance,
    }
}

/// Run one document through the full pipeline: resolve balances, extract
/// transactions, reconcile. The only failure mode is a config whose label
/// synonyms cannot compile; the passes themselves degrade to defaults.
pub fn run(
    config: &ReconConfig,
    file: &str,
    doc: &StructuredDocument,
) -> Result<StatementReport, ReconError> {
    let matcher = config.matcher()?;
    Ok(run_with_matcher(&matcher, config.tolerance.variance, file, doc))
}

/// Like [`run`], with a pre-compiled matcher. The batch path compiles once
/// and reuses it across documents.
pub fn run_with_matcher(
    matcher: &LabelMatcher,
    tolerance: f64,
    file: &str,
    doc: &StructuredDocument,
) -> StatementReport {
    let balances = resolve_balances(matcher, doc);
    let transactions = extract_transactions(doc);
    let reconciliation = reconcile(
        balances.starting.value,
        balances.ending.value,
        &transactions,
        tolerance,
    );

    StatementReport {
        meta: meta(file),
        starting_source: balances.starting.source,
        ending_source: balances.ending.source,
        transactions,
        reconciliation,
    }
}

/// Report for a document the analysis service could not process: all-zero
/// balances and no transactions, so one bad file never aborts a batch.
pub fn degenerate_report(file: &str) -> StatementReport {
    StatementReport {
        meta: meta(file),
        starting_source: BalanceSource::Default,
        ending_source: BalanceSource::Default,
        transactions: vec![],
        reconciliation: reconcile(0.0, 0.0, &[], 0.01),
    }
}

fn meta(file: &str) -> ReportMeta {
    ReportMeta {
        file: file.to_string(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        run_at: chrono::Utc::now().to_rfc3339(),
    }
}
