//! Document analysis client, shared between `analyze` and `batch`.
//!
//! This crate is the single source of truth for the analysis service wire
//! contract: submit document bytes, poll the operation, map the result JSON
//! into the core model. It also defines [`DocumentSource`], the seam the CLI
//! and tests use so the reconciliation core never touches the network.
//!
//! No retries beyond the poll loop. No async runtime.

mod client;
mod credentials;
mod source;

pub use client::{map_analyze_result, AnalyzerClient, AnalyzerError};
pub use credentials::{resolve_credentials, Credentials};
pub use source::{DocumentSource, FixtureSource};
