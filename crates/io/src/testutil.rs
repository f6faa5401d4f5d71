use tally_engine::model::{BalanceSource, Direction, ReportMeta, TransactionRecord};
use tally_engine::{reconcile, StatementReport};

pub(crate) fn report(file: &str, starting: f64, ending: f64) -> StatementReport {
    report_with_transactions(file, starting, ending, vec![])
}

pub(crate) fn report_with_transactions(
    file: &str,
    starting: f64,
    ending: f64,
    transactions: Vec<TransactionRecord>,
) -> StatementReport {
    let reconciliation = reconcile(starting, ending, &transactions, 0.01);
    StatementReport {
        meta: ReportMeta {
            file: file.into(),
            engine_version: "test".into(),
            run_at: "2026-01-01T00:00:00Z".into(),
        },
        starting_source: BalanceSource::KeyValue,
        ending_source: BalanceSource::KeyValue,
        transactions,
        reconciliation,
    }
}

pub(crate) fn txn(date: &str, description: &str, amount: f64) -> TransactionRecord {
    let direction = if amount > 0.0 { Direction::Credit } else { Direction::Debit };
    TransactionRecord {
        date: date.into(),
        description: description.into(),
        amount,
        direction,
    }
}
