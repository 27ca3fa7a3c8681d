//! End-to-end recitation checking.
//!
//! A recitation is expected to open and close with the reference, so both
//! the verse text and the transcript are compared in the framed form
//! `"{reference} {text} {reference}"`.

use serde::Serialize;

use crate::bible::{parse, VerseReference};
use crate::content::VerseContent;
use crate::error::Result;
use crate::grading::{score, DiffPart, RecitationScore};
use crate::transcript::{NormalizationRequest, TranscriptNormalizer};

/// Everything a front end needs to show a graded recitation.
#[derive(Debug, Clone, Serialize)]
pub struct RecitationReport {
    /// The reference being recited.
    pub reference: VerseReference,
    /// Transcript after reference repair.
    pub normalized_transcript: String,
    /// Framed verse text the transcript was compared with.
    pub canonical_text: String,
    /// Word diff in reading order.
    pub parts: Vec<DiffPart>,
    /// Counts and grade.
    pub score: RecitationScore,
}

/// Frame verse text with its reference before and after.
pub fn frame_recitation(reference: &VerseReference, text: &str) -> String {
    format!("{reference} {} {reference}", text.trim())
}

/// Runs normalization, extraction and grading for one recitation.
#[derive(Default)]
pub struct RecitationChecker {
    normalizer: TranscriptNormalizer,
}

impl RecitationChecker {
    /// Checker with the built-in repair rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checker with a custom normalizer.
    pub const fn with_normalizer(normalizer: TranscriptNormalizer) -> Self {
        Self { normalizer }
    }

    /// Grade a spoken transcript against rich verse content.
    pub fn check(&self, reference: &str, transcript: &str, content: &VerseContent) -> Result<RecitationReport> {
        let verse_text = content.to_plain_text()?;
        self.check_text(reference, transcript, &verse_text)
    }

    /// Grade a transcript against already-flattened verse text.
    pub fn check_text(&self, reference: &str, transcript: &str, verse_text: &str) -> Result<RecitationReport> {
        let reference = parse(reference)?;
        let canonical_text = frame_recitation(&reference, verse_text);

        let normalized_transcript = self.normalizer.normalize(&NormalizationRequest::new(
            transcript,
            reference.to_string(),
            canonical_text.clone(),
        ));

        let summary = score(&normalized_transcript, &canonical_text);
        let result = summary.grade();
        tracing::debug!(
            reference = %reference,
            words = result.word_count,
            errors = result.error_count,
            grade = %result.letter_grade,
            "Graded recitation"
        );

        Ok(RecitationReport {
            reference,
            normalized_transcript,
            canonical_text,
            parts: summary.parts,
            score: result,
        })
    }
}
