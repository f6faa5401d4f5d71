//! `tally analyze`: one statement through the pipeline.

use std::path::PathBuf;

use tally_engine::StatementReport;
use tally_io::format_money;

use crate::exit_codes::EXIT_DISCREPANT;
use crate::{document_name, document_source, load_config, resolve_format, CliError, SourceFormat};

#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    file: PathBuf,
    from: Option<SourceFormat>,
    config: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
    endpoint: Option<String>,
    key: Option<String>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    let format = resolve_format(&file, from);
    let source = document_source(format, endpoint.as_deref(), key.as_deref())?;

    let doc = source.structured_document(&file).map_err(CliError::analyzer)?;
    let report = tally_engine::run(&config, &document_name(&file), &doc)
        .map_err(|e| CliError::parse(e.to_string()))?;

    if !quiet {
        for field in report.unresolved_fields() {
            eprintln!("warning: {}: could not resolve {}", report.meta.file, field);
        }
    }

    if let Some(path) = &output {
        let mut body = serde_json::to_vec_pretty(&report)
            .map_err(|e| CliError::io(e.to_string()))?;
        body.push(b'\n');
        std::fs::write(path, body)
            .map_err(|e| CliError::io(format!("cannot write {}: {}", path.display(), e)))?;
    }

    if json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", body);
    } else {
        eprint!("{}", summary(&report));
    }

    if report.reconciliation.is_discrepant {
        return Err(CliError::silent(EXIT_DISCREPANT));
    }
    Ok(())
}

fn summary(report: &StatementReport) -> String {
    let r = &report.reconciliation;
    let status = if r.is_discrepant { "DISCREPANT" } else { "OK" };
    format!(
        "{}\n\
         \x20 starting balance:   {} ({})\n\
         \x20 ending balance:     {} ({})\n\
         \x20 transactions:       {} ({} net)\n\
         \x20 expected ending:    {}\n\
         \x20 variance:           {}\n\
         \x20 status:             {}\n",
        report.meta.file,
        format_money(r.starting_balance),
        report.starting_source,
        format_money(r.ending_balance),
        report.ending_source,
        report.transactions.len(),
        format_money(r.total_transactions),
        format_money(r.expected_ending),
        format_money(r.variance),
        status,
    )
}
