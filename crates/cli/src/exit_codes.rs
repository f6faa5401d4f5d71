//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3       | Universal        | I/O error reading or writing files       |
//! | 4       | Universal        | Parse error (config or input)            |
//! | 10-19   | reconcile        | Reconciliation outcomes                  |
//! | 50-59   | analyzer         | Document analysis service codes          |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use tally_analyzer::AnalyzerError;

// =============================================================================
// Universal (0-4)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - cannot read input or write output.
pub const EXIT_IO: u8 = 3;

/// Parse error - malformed config or input document.
pub const EXIT_PARSE: u8 = 4;

// =============================================================================
// Reconciliation (10-19)
// =============================================================================

/// One or more statements reconciled with a discrepancy.
/// Like `diff(1)` exit 1, this is an outcome, not a failure.
pub const EXIT_DISCREPANT: u8 = 10;

// =============================================================================
// Analyzer (50-59)
// =============================================================================

/// Analysis service endpoint/key not configured.
pub const EXIT_ANALYZER_NOT_CONFIGURED: u8 = 50;

/// Analysis service rejected the credentials.
pub const EXIT_ANALYZER_AUTH: u8 = 51;

/// Network failure talking to the analysis service.
pub const EXIT_ANALYZER_NETWORK: u8 = 52;

/// Analysis operation did not complete in time.
pub const EXIT_ANALYZER_TIMEOUT: u8 = 53;

/// Map an analyzer error to its exit code.
pub fn analyzer_exit_code(err: &AnalyzerError) -> u8 {
    match err {
        AnalyzerError::NotConfigured => EXIT_ANALYZER_NOT_CONFIGURED,
        AnalyzerError::Http(401, _) | AnalyzerError::Http(403, _) => EXIT_ANALYZER_AUTH,
        AnalyzerError::Network(_) => EXIT_ANALYZER_NETWORK,
        AnalyzerError::Timeout(_) => EXIT_ANALYZER_TIMEOUT,
        AnalyzerError::Io(_) => EXIT_IO,
        AnalyzerError::Parse(_) => EXIT_PARSE,
        AnalyzerError::Http(_, _) | AnalyzerError::Failed(_) => EXIT_ERROR,
    }
}
