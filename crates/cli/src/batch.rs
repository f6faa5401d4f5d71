//! `tally batch`: reconcile a folder and write the report artifacts.
//!
//! Partial-failure policy: a document the source cannot produce is reported
//! as a warning and replaced with an all-zero degenerate report, and the
//! batch keeps going. One bad scan never hides the rest of the month.

use std::path::{Path, PathBuf};

use tally_engine::engine::run_with_matcher;
use tally_engine::{degenerate_report, StatementReport};
use tally_io::write_batch_artifacts;

use crate::exit_codes::EXIT_DISCREPANT;
use crate::{document_name, document_source, load_config, CliError, SourceFormat};

pub fn cmd_batch(
    input_dir: PathBuf,
    out_dir: Option<PathBuf>,
    from: Option<SourceFormat>,
    config: Option<PathBuf>,
    endpoint: Option<String>,
    key: Option<String>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    let matcher = config.matcher().map_err(|e| CliError::parse(e.to_string()))?;

    let format = from.unwrap_or(SourceFormat::Pdf);
    let files = statement_files(&input_dir, format)?;
    if files.is_empty() && !quiet {
        eprintln!(
            "warning: no .{} files found in {}",
            extension_for(format),
            input_dir.display()
        );
    }

    // Credentials resolve once, before the first document
    let source = document_source(format, endpoint.as_deref(), key.as_deref())?;

    let mut reports: Vec<StatementReport> = Vec::with_capacity(files.len());
    for path in &files {
        let name = document_name(path);
        let report = match source.structured_document(path) {
            Ok(doc) => run_with_matcher(&matcher, config.tolerance.variance, &name, &doc),
            Err(err) => {
                eprintln!("warning: {}: {}", name, err);
                degenerate_report(&name)
            }
        };
        if !quiet {
            for field in report.unresolved_fields() {
                eprintln!("warning: {}: could not resolve {}", name, field);
            }
        }
        reports.push(report);
    }

    let out_dir = out_dir.unwrap_or_else(|| input_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {}", out_dir.display(), e)))?;
    let artifacts =
        write_batch_artifacts(&out_dir, &reports).map_err(|e| CliError::io(e.to_string()))?;

    let discrepant = reports.iter().filter(|r| r.reconciliation.is_discrepant).count();
    println!("Processed {} statements, {} discrepant", reports.len(), discrepant);
    println!("  {}", artifacts.summary_csv.display());
    println!("  {}", artifacts.statements_json.display());
    println!("  {}", artifacts.discrepancy_report.display());
    println!("  {}", artifacts.variance_chart.display());

    if discrepant > 0 {
        return Err(CliError::silent(EXIT_DISCREPANT));
    }
    Ok(())
}

/// Files in `dir` with the format's extension, sorted by name. Two runs
/// over the same folder process documents in the same order.
fn statement_files(dir: &Path, format: SourceFormat) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::args(format!("{} is not a directory", dir.display()))
            .with_hint("tally batch takes a folder of statements"));
    }

    let wanted = extension_for(format);
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn extension_for(format: SourceFormat) -> &'static str {
    match format {
        SourceFormat::Pdf => "pdf",
        SourceFormat::Json => "json",
    }
}
