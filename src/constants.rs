//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Verse reference validation bounds.
pub mod validation {
    /// Shortest accepted reference ("Job 1:1" is seven characters).
    pub const MIN_REFERENCE_LEN: usize = 6;

    /// Longest accepted reference.
    pub const MAX_REFERENCE_LEN: usize = 40;

    /// Minimum fuzzy score before a book name is offered as a suggestion.
    pub const MIN_SUGGESTION_SCORE: i64 = 40;
}

/// Transcript repair constants.
pub mod transcript {
    /// Numbers below this are spelled out by some recognizers.
    pub const SPELLED_NUMBER_LIMIT: u32 = 10;

    /// Words recognizers emit in place of a range hyphen.
    ///
    /// The bare "2" shows up when "to" or "dash" is heard as a digit.
    pub const RANGE_DIVIDERS: &[&str] = &[" to ", " through ", "2"];
}

/// Recitation grading constants.
pub mod grading {
    /// Whole-percentage floors for the A, B, C and D grades.
    pub const GRADE_FLOORS: [u32; 4] = [90, 80, 70, 60];

    /// Dashes that join two words without spaces ("world—that").
    ///
    /// A plain hyphen only splits when it sits between two letters.
    pub const WORD_DASHES: &[char] = &['\u{2014}', '\u{2013}'];

    /// Largest LCS table the word diff will allocate after trimming the
    /// common prefix and suffix.
    pub const MAX_LCS_CELLS: usize = 4_000_000;
}
