//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

use crate::bible::validate::ValidationIssue;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// A verse reference could not be decomposed into book/chapter/verse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A verse reference was rejected by the validator
    #[error("Invalid verse reference {reference:?}: {}", join_issues(.issues))]
    Validation {
        /// The rejected input.
        reference: String,
        /// Every problem found, in check order.
        issues: Vec<ValidationIssue>,
    },

    /// Verse content markup could not be read
    #[error("Verse content error: {message}")]
    Content {
        /// Description of the markup problem.
        message: String,
    },

    /// Verse library lookup or load failure
    #[error("Library error in {file:?}: {message}")]
    Library {
        /// Library file involved, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the failure.
        message: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

/// Failure to decompose a verse reference string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No alphabetic book name could be located.
    #[error("no book name found in {reference:?}")]
    MissingBookName {
        /// The offending input.
        reference: String,
    },

    /// No colon separates chapter from verse.
    #[error("missing chapter:verse separator in {reference:?}")]
    MissingColon {
        /// The offending input.
        reference: String,
    },

    /// More than one colon follows the book name.
    #[error("more than one colon in {reference:?}")]
    ExtraColon {
        /// The offending input.
        reference: String,
    },

    /// A chapter or verse segment is not a positive integer.
    #[error("{segment:?} is not a valid chapter or verse number in {reference:?}")]
    InvalidNumber {
        /// The segment that failed to parse.
        segment: String,
        /// The offending input.
        reference: String,
    },

    /// The verse range ends before it starts.
    #[error("verse range {start}-{end} runs backwards")]
    InvertedRange {
        /// First verse of the range.
        start: u32,
        /// Last verse of the range.
        end: u32,
    },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a content markup error
    pub fn content(message: impl Into<String>) -> Self {
        Self::Content { message: message.into() }
    }

    /// Create a library error with file context
    pub fn library(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Library { file: file.into(), message: message.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn validation_error_lists_every_issue() {
        let err = Error::Validation {
            reference: "John3:16".into(),
            issues: vec![
                ValidationIssue::BookChapterSpacing { found: 0 },
                ValidationIssue::ColonCount { found: 2 },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("John3:16"));
        assert!(message.contains("; "));
    }

    #[test]
    fn parse_error_converts_transparently() {
        let err: Error = ParseError::InvertedRange { start: 5, end: 2 }.into();
        assert_eq!(err.to_string(), "verse range 5-2 runs backwards");
    }

    #[test]
    fn config_error_carries_hint() {
        let err = Error::config("library file missing", "Set VERSECHECK_LIBRARY");
        match err {
            Error::Config { hint, .. } => assert!(hint.contains("VERSECHECK_LIBRARY")),
            _ => panic!("Expected Config error"),
        }
    }
}
