use serde::Deserialize;

use crate::error::ReconError;
use crate::labels::{LabelMatcher, DEFAULT_ENDING, DEFAULT_STARTING};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Reconciliation run configuration. Every field has a default that matches
/// the engine's stock behavior, so `ReconConfig::default()` is a valid run.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            tolerance: ToleranceConfig::default(),
            labels: LabelsConfig::default(),
        }
    }
}

fn default_name() -> String {
    "statement reconciliation".into()
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ToleranceConfig {
    /// Absolute variance (in the statement's currency unit) above which a
    /// document is flagged. The default absorbs float rounding only.
    #[serde(default = "default_variance")]
    pub variance: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { variance: default_variance() }
    }
}

fn default_variance() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LabelsConfig {
    #[serde(default = "default_starting")]
    pub starting: Vec<String>,
    #[serde(default = "default_ending")]
    pub ending: Vec<String>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            starting: default_starting(),
            ending: default_ending(),
        }
    }
}

fn default_starting() -> Vec<String> {
    DEFAULT_STARTING.iter().map(|s| s.to_string()).collect()
}

fn default_ending() -> Vec<String> {
    DEFAULT_ENDING.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if !self.tolerance.variance.is_finite() || self.tolerance.variance < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance.variance must be finite and >= 0, got {}",
                self.tolerance.variance
            )));
        }

        // Compiling the matcher exercises the synonym rules.
        LabelMatcher::from_synonyms(&self.labels.starting, &self.labels.ending)?;

        Ok(())
    }

    /// Compile the label matcher this config describes.
    pub fn matcher(&self) -> Result<LabelMatcher, ReconError> {
        LabelMatcher::from_synonyms(&self.labels.starting, &self.labels.ending)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
