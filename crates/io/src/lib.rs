//! Batch report writers.
//!
//! Everything a `batch` run leaves on disk comes from here: the summary
//! CSV, the per-statement JSON export, the free-text discrepancy report,
//! and the variance bar chart. Writers take finished [`StatementReport`]s
//! and an output directory; none of them mutate the reports.
//!
//! [`StatementReport`]: tally_engine::StatementReport

mod chart;
mod discrepancy;
mod error;
mod json;
mod summary;
#[cfg(test)]
mod testutil;

use std::path::{Path, PathBuf};

use tally_engine::StatementReport;

pub use chart::write_variance_chart;
pub use discrepancy::{format_money, write_discrepancy_report};
pub use error::ReportError;
pub use json::write_statements_json;
pub use summary::write_summary_csv;

/// Paths of the artifacts one batch run produces.
#[derive(Debug, Clone)]
pub struct BatchArtifacts {
    pub summary_csv: PathBuf,
    pub statements_json: PathBuf,
    pub discrepancy_report: PathBuf,
    pub variance_chart: PathBuf,
}

/// Write all four batch artifacts into `dir`.
pub fn write_batch_artifacts(
    dir: &Path,
    reports: &[StatementReport],
) -> Result<BatchArtifacts, ReportError> {
    Ok(BatchArtifacts {
        summary_csv: write_summary_csv(dir, reports)?,
        statements_json: write_statements_json(dir, reports)?,
        discrepancy_report: write_discrepancy_report(dir, reports)?,
        variance_chart: write_variance_chart(dir, reports)?,
    })
}
