//! Balance label matching.
//!
//! The starting/ending keyword sets are data-driven so pattern coverage can
//! be tested (and localized) independently of the resolver control flow.
//! A label matches when a synonym and a balance word appear in that order,
//! each on a word boundary: "Previous statement balance" matches the
//! starting set, "balance previous" does not.

use regex::Regex;

use crate::error::ReconError;

pub const DEFAULT_STARTING: &[&str] =
    &["starting", "beginning", "previous", "opening", "prior", "initial"];
pub const DEFAULT_ENDING: &[&str] = &["ending", "current", "closing", "new", "final"];

const BALANCE_WORDS: &[&str] = &["balance", "bal"];

/// Compiled starting/ending matchers. Inputs are expected lowercased.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    starting: Regex,
    ending: Regex,
}

impl LabelMatcher {
    /// Build matchers from synonym lists. Synonyms must be lowercase word
    /// characters only; anything else would change the pattern's meaning.
    pub fn from_synonyms(starting: &[String], ending: &[String]) -> Result<Self, ReconError> {
        Ok(Self {
            starting: build_pattern(starting)?,
            ending: build_pattern(ending)?,
        })
    }

    pub fn is_starting(&self, text: &str) -> bool {
        self.starting.is_match(text)
    }

    pub fn is_ending(&self, text: &str) -> bool {
        self.ending.is_match(text)
    }
}

impl Default for LabelMatcher {
    fn default() -> Self {
        // The default sets are static and known-good; compilation cannot fail.
        Self {
            starting: Regex::new(
                r"\b(starting|beginning|previous|opening|prior|initial)\b.*\b(balance|bal)\b",
            )
            .unwrap(),
            ending: Regex::new(r"\b(ending|current|closing|new|final)\b.*\b(balance|bal)\b")
                .unwrap(),
        }
    }
}

fn build_pattern(synonyms: &[String]) -> Result<Regex, ReconError> {
    if synonyms.is_empty() {
        return Err(ReconError::BadLabel("synonym list is empty".into()));
    }
    for syn in synonyms {
        if syn.is_empty() || !syn.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
            return Err(ReconError::BadLabel(format!(
                "{syn:?} (must be non-empty lowercase ascii)"
            )));
        }
    }

    let pattern = format!(
        r"\b({})\b.*\b({})\b",
        synonyms.join("|"),
        BALANCE_WORDS.join("|"),
    );
    Regex::new(&pattern).map_err(|e| ReconError::BadLabel(e.to_string()))
}
