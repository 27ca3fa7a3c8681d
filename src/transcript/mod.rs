//! Speech transcript normalization.
//!
//! Recognizers render verse references inconsistently across browsers and
//! operating systems: spelled-out numbers, ordinal book prefixes, missing
//! colons, "to"/"through" instead of a hyphen. [`TranscriptNormalizer`]
//! rewrites those into the canonical reference so that the transcript can
//! be compared word for word with the verse text.

pub mod numbers;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::bible::parse;
pub use rules::{default_rules, RepairRule};

/// A transcript to repair against a known-correct reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationRequest {
    /// Raw recognizer output.
    pub transcript: String,
    /// The reference being recited, e.g. "2 Corinthians 5:7".
    pub verse_reference: String,
    /// Known-correct verse text. Carried for callers; rules do not read it.
    pub verse_text: String,
}

impl NormalizationRequest {
    /// Build a request from borrowed parts.
    pub fn new(
        transcript: impl Into<String>,
        verse_reference: impl Into<String>,
        verse_text: impl Into<String>,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            verse_reference: verse_reference.into(),
            verse_text: verse_text.into(),
        }
    }
}

/// Ordered pipeline of [`RepairRule`]s.
pub struct TranscriptNormalizer {
    rules: Vec<Box<dyn RepairRule>>,
}

impl Default for TranscriptNormalizer {
    fn default() -> Self {
        Self { rules: default_rules() }
    }
}

impl TranscriptNormalizer {
    /// Normalizer with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to run after the existing ones.
    #[must_use]
    pub fn with_rule(mut self, rule: impl RepairRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the rules in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Repair the transcript. Never fails: an unparseable reference or a
    /// transcript with nothing to repair comes back unchanged.
    pub fn normalize(&self, request: &NormalizationRequest) -> String {
        let reference = match parse(&request.verse_reference) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Leaving transcript unchanged: {e}");
                return request.transcript.clone();
            }
        };

        let mut transcript = request.transcript.clone();
        for rule in &self.rules {
            if let Some(repaired) = rule.apply(&transcript, &reference) {
                tracing::debug!(rule = rule.name(), reference = %reference, "Repaired transcript");
                transcript = repaired;
            }
        }
        transcript
    }
}
