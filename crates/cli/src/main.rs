// Tally CLI - bank statement reconciliation, headless

mod analyze;
mod batch;
mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tally_analyzer::{resolve_credentials, AnalyzerClient, AnalyzerError, DocumentSource, FixtureSource};
use tally_engine::ReconConfig;

use exit_codes::{analyzer_exit_code, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Reconcile bank statements against their extracted structure")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a single statement
    #[command(after_help = "\
Examples:
  tally analyze statement.pdf
  tally analyze extracted.json --from json --json
  tally analyze statement.pdf --config tally.toml -o report.json")]
    Analyze {
        /// Statement to reconcile
        file: PathBuf,

        /// Input format (inferred from the extension when omitted)
        #[arg(long, short = 'f')]
        from: Option<SourceFormat>,

        /// Reconciliation config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Analysis service endpoint
        #[arg(long, env = "TALLY_ENDPOINT")]
        endpoint: Option<String>,

        /// Analysis service API key
        #[arg(long, env = "TALLY_API_KEY")]
        key: Option<String>,

        /// Suppress warnings
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Reconcile every statement in a folder and write the batch reports
    #[command(after_help = "\
Examples:
  tally batch ./statements
  tally batch ./statements --out-dir ./reports
  tally batch ./fixtures --from json --config tally.toml")]
    Batch {
        /// Folder of statements
        input_dir: PathBuf,

        /// Where to write the report artifacts (defaults to the input folder)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Input format (default: pdf)
        #[arg(long, short = 'f')]
        from: Option<SourceFormat>,

        /// Reconciliation config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Analysis service endpoint
        #[arg(long, env = "TALLY_ENDPOINT")]
        endpoint: Option<String>,

        /// Analysis service API key
        #[arg(long, env = "TALLY_API_KEY")]
        key: Option<String>,

        /// Suppress warnings
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Parse and validate a config file
    Validate {
        /// Config file (TOML)
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceFormat {
    /// Send the document to the analysis service
    Pdf,
    /// Read a pre-extracted structured document
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            file,
            from,
            config,
            json,
            output,
            endpoint,
            key,
            quiet,
        } => analyze::cmd_analyze(file, from, config, json, output, endpoint, key, quiet),
        Commands::Batch {
            input_dir,
            out_dir,
            from,
            config,
            endpoint,
            key,
            quiet,
        } => batch::cmd_batch(input_dir, out_dir, from, config, endpoint, key, quiet),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    /// Create error from analyzer error with proper exit code.
    pub fn analyzer(err: AnalyzerError) -> Self {
        let code = analyzer_exit_code(&err);
        let hint = match &err {
            AnalyzerError::NotConfigured => {
                Some("export TALLY_ENDPOINT and TALLY_API_KEY, or pass --endpoint and --key".to_string())
            }
            AnalyzerError::Http(401, _) | AnalyzerError::Http(403, _) => {
                Some("check the TALLY_API_KEY value".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Exit with a code and no message (outcome codes like discrepancy).
    pub fn silent(code: u8) -> Self {
        Self { code, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;
    let config = ReconConfig::from_toml(&contents)
        .map_err(|e| CliError::parse(format!("{}: {}", path.display(), e)))?;

    println!("config ok: {}", path.display());
    if !config.name.is_empty() {
        println!("  name:            {}", config.name);
    }
    println!("  tolerance:       {}", config.tolerance.variance);
    println!("  starting labels: {}", config.labels.starting.join(", "));
    println!("  ending labels:   {}", config.labels.ending.join(", "));
    Ok(())
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Load the reconciliation config, or defaults when no path was given.
fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    match path {
        None => Ok(ReconConfig::default()),
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;
            ReconConfig::from_toml(&contents)
                .map_err(|e| CliError::parse(format!("{}: {}", path.display(), e)))
        }
    }
}

/// Pick the input format: an explicit flag wins, otherwise the extension.
fn resolve_format(file: &Path, flag: Option<SourceFormat>) -> SourceFormat {
    flag.unwrap_or_else(|| {
        match file.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Pdf,
        }
    })
}

/// Build the document source for a format. The pdf path needs credentials;
/// the json path reads fixtures locally.
fn document_source(
    format: SourceFormat,
    endpoint: Option<&str>,
    key: Option<&str>,
) -> Result<Box<dyn DocumentSource>, CliError> {
    match format {
        SourceFormat::Pdf => {
            let creds = resolve_credentials(endpoint, key).map_err(CliError::analyzer)?;
            Ok(Box::new(AnalyzerClient::new(creds)))
        }
        SourceFormat::Json => Ok(Box::new(FixtureSource)),
    }
}

/// The name a document is reported under: its file name, not the full path.
fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
