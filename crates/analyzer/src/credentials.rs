//! Credential resolution for the analysis service.
//!
//! Precedence: explicit flags, then `TALLY_ENDPOINT` / `TALLY_API_KEY`, then
//! a NotConfigured error. Both endpoint and key must resolve; a partial
//! configuration is treated as none at all.

use crate::client::AnalyzerError;

/// Resolved service endpoint and API key.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Service base URL, no trailing slash (e.g. "https://eastus.api.cognitive.microsoft.com")
    pub endpoint: String,
    /// Subscription key, sent as `Ocp-Apim-Subscription-Key`
    pub api_key: String,
}

pub const ENDPOINT_VAR: &str = "TALLY_ENDPOINT";
pub const API_KEY_VAR: &str = "TALLY_API_KEY";

/// Resolve credentials from optional flag values, falling back to the
/// environment.
pub fn resolve_credentials(
    flag_endpoint: Option<&str>,
    flag_key: Option<&str>,
) -> Result<Credentials, AnalyzerError> {
    from_parts(
        flag_endpoint.map(String::from).or_else(|| env_nonempty(ENDPOINT_VAR)),
        flag_key.map(String::from).or_else(|| env_nonempty(API_KEY_VAR)),
    )
}

fn from_parts(endpoint: Option<String>, api_key: Option<String>) -> Result<Credentials, AnalyzerError> {
    match (endpoint, api_key) {
        (Some(endpoint), Some(api_key)) => Ok(Credentials {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }),
        _ => Err(AnalyzerError::NotConfigured),
    }
}

fn env_nonempty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}
