//! `tally-engine`: statement balance extraction and reconciliation.
//!
//! Pure engine crate: receives a pre-analyzed document structure, returns
//! resolved balances, extracted transactions, and a reconciliation verdict.
//! No CLI or IO dependencies.

pub mod balance;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod labels;
pub mod model;
pub mod money;

pub use config::ReconConfig;
pub use engine::{degenerate_report, reconcile, run};
pub use error::ReconError;
pub use model::{ReconciliationResult, StatementReport, StructuredDocument, TransactionRecord};
