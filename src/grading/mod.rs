//! Recitation grading.

pub mod diff;

use std::fmt;

use serde::Serialize;

use crate::constants::grading::GRADE_FLOORS;
pub use diff::{score, word_diff, DiffPart, DiffSummary};

/// Letter grade for a recitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LetterGrade {
    /// Every word correct.
    #[serde(rename = "A+")]
    APlus,
    /// 90% or better.
    A,
    /// 80% or better.
    B,
    /// 70% or better.
    C,
    /// 60% or better.
    D,
    /// Below 60%.
    F,
}

impl LetterGrade {
    /// Grade for a whole percentage.
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 100 {
            return Self::APlus;
        }
        [Self::A, Self::B, Self::C, Self::D]
            .into_iter()
            .zip(GRADE_FLOORS)
            .find(|&(_, floor)| percentage >= floor)
            .map_or(Self::F, |(grade, _)| grade)
    }

    /// Display label ("A+", "A", ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score derived from diff counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecitationScore {
    /// Words the verse contains.
    pub word_count: usize,
    /// Missed plus extra words.
    pub error_count: usize,
    /// Whole percentage correct, rounded down, never negative.
    pub percentage: u32,
    /// Letter grade for `percentage`.
    pub letter_grade: LetterGrade,
}

impl RecitationScore {
    /// Grade from word and error counts. No words scores 0%.
    #[must_use]
    pub fn from_counts(word_count: usize, error_count: usize) -> Self {
        let correct = word_count.saturating_sub(error_count);
        let percentage = if word_count == 0 {
            0
        } else {
            u32::try_from(correct * 100 / word_count).unwrap_or(0)
        };
        Self {
            word_count,
            error_count,
            percentage,
            letter_grade: LetterGrade::from_percentage(percentage),
        }
    }
}

impl DiffSummary {
    /// Grade this diff.
    #[must_use]
    pub fn grade(&self) -> RecitationScore {
        RecitationScore::from_counts(self.word_count, self.error_count)
    }
}
