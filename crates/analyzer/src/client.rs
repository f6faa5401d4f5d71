//! Analysis service HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers the full analysis flow: submit bytes → poll operation → map result.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use tally_engine::model::{Cell, KeyValuePair, StructuredDocument, Table};

use crate::credentials::Credentials;

const API_VERSION: &str = "2024-02-29-preview";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(300);

/// Analysis service client (blocking).
#[derive(Clone)]
pub struct AnalyzerClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

/// Error type for analyzer operations.
#[derive(Debug)]
pub enum AnalyzerError {
    /// No endpoint/key configured
    NotConfigured,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Response JSON did not have the expected shape
    Parse(String),
    /// File I/O error
    Io(String),
    /// The service reported the analysis as failed
    Failed(String),
    /// Timeout waiting for the operation
    Timeout(String),
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerError::NotConfigured => write!(
                f,
                "Analyzer not configured: set TALLY_ENDPOINT and TALLY_API_KEY, or pass --endpoint and --key"
            ),
            AnalyzerError::Network(msg) => write!(f, "Network error: {}", msg),
            AnalyzerError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            AnalyzerError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AnalyzerError::Io(msg) => write!(f, "I/O error: {}", msg),
            AnalyzerError::Failed(msg) => write!(f, "Analysis failed: {}", msg),
            AnalyzerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
        }
    }
}

impl std::error::Error for AnalyzerError {}

impl AnalyzerClient {
    /// Create a new client with resolved credentials.
    pub fn new(creds: Credentials) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("tally/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            endpoint: creds.endpoint,
            api_key: creds.api_key,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Override the poll cadence. Tests use a zero interval.
    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_timeout = timeout;
        self
    }

    /// Analyze a document file end to end: submit, poll, map.
    pub fn analyze_file(&self, path: &Path) -> Result<StructuredDocument, AnalyzerError> {
        let bytes = std::fs::read(path).map_err(|e| AnalyzerError::Io(e.to_string()))?;
        let operation_url = self.submit(bytes)?;
        self.poll(&operation_url)
    }

    /// Submit document bytes (analysis flow step 1).
    /// Returns the operation URL to poll.
    fn submit(&self, bytes: Vec<u8>) -> Result<String, AnalyzerError> {
        let url = format!(
            "{}/documentintelligence/documentModels/prebuilt-document:analyze?api-version={}",
            self.endpoint, API_VERSION
        );

        let response = self
            .http
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalyzerError::Http(status, body));
        }

        response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| AnalyzerError::Parse("Missing Operation-Location header".into()))
    }

    /// Poll until the operation reaches a terminal state (analysis flow
    /// step 2), then map the result.
    fn poll(&self, operation_url: &str) -> Result<StructuredDocument, AnalyzerError> {
        let start = Instant::now();

        loop {
            if start.elapsed() > self.poll_timeout {
                return Err(AnalyzerError::Timeout(format!(
                    "Analysis did not complete within {}s",
                    self.poll_timeout.as_secs()
                )));
            }

            let response = self
                .http
                .get(operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.api_key)
                .send()
                .map_err(|e| AnalyzerError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            if !response.status().is_success() {
                let body = response.text().unwrap_or_default();
                return Err(AnalyzerError::Http(status, body));
            }

            let json: serde_json::Value =
                response.json().map_err(|e| AnalyzerError::Parse(e.to_string()))?;

            match json["status"].as_str().unwrap_or("unknown") {
                "succeeded" => return map_analyze_result(&json["analyzeResult"]),
                "failed" => {
                    let msg = json["error"]["message"]
                        .as_str()
                        .unwrap_or("analysis failed on server")
                        .to_string();
                    return Err(AnalyzerError::Failed(msg));
                }
                _ => {
                    // Still running
                }
            }

            thread::sleep(self.poll_interval);
        }
    }
}

/// Map the service's `analyzeResult` payload into the core model.
///
/// Only `keyValuePairs[].{key,value}.content` and
/// `tables[].cells[].{rowIndex,columnIndex,content}` are read; everything
/// else the service returns (spans, polygons, confidences) is dropped.
pub fn map_analyze_result(result: &serde_json::Value) -> Result<StructuredDocument, AnalyzerError> {
    if result.is_null() {
        return Err(AnalyzerError::Parse("Missing analyzeResult in response".into()));
    }

    let key_value_pairs = result["keyValuePairs"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .map(|pair| KeyValuePair {
            key: pair["key"]["content"].as_str().map(String::from),
            value: pair["value"]["content"].as_str().map(String::from),
        })
        .collect();

    let tables = result["tables"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .map(|table| Table {
            cells: table["cells"]
                .as_array()
                .unwrap_or(&vec![])
                .iter()
                .filter_map(|cell| {
                    Some(Cell {
                        row: cell["rowIndex"].as_u64()? as u32,
                        col: cell["columnIndex"].as_u64()? as u32,
                        content: cell["content"].as_str().unwrap_or("").to_string(),
                    })
                })
                .collect(),
        })
        .collect();

    Ok(StructuredDocument { key_value_pairs, tables })
}
