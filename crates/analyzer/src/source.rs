//! Document sources.
//!
//! [`DocumentSource`] is the seam between the pipeline and wherever
//! structured documents come from. The CLI picks the live client or the
//! fixture reader; tests inject whatever they need.

use std::path::Path;

use tally_engine::StructuredDocument;

use crate::client::{map_analyze_result, AnalyzerClient, AnalyzerError};

/// Anything that can turn a file path into a structured document.
pub trait DocumentSource {
    fn structured_document(&self, path: &Path) -> Result<StructuredDocument, AnalyzerError>;
}

impl DocumentSource for AnalyzerClient {
    fn structured_document(&self, path: &Path) -> Result<StructuredDocument, AnalyzerError> {
        self.analyze_file(path)
    }
}

/// Reads pre-extracted documents from JSON files. Accepts either the core
/// [`StructuredDocument`] shape or a saved service response with an
/// `analyzeResult` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl DocumentSource for FixtureSource {
    fn structured_document(&self, path: &Path) -> Result<StructuredDocument, AnalyzerError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| AnalyzerError::Io(e.to_string()))?;
        let json: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| AnalyzerError::Parse(e.to_string()))?;

        if json.get("analyzeResult").is_some() {
            return map_analyze_result(&json["analyzeResult"]);
        }
        serde_json::from_value(json).map_err(|e| AnalyzerError::Parse(e.to_string()))
    }
}
