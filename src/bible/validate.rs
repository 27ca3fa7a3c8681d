//! Strict verse reference validation for user-typed search input.
//!
//! Unlike [`parse`], every problem is reported so a form can show a
//! complete message.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use thiserror::Error;

use super::reference::{book_name_len, parse, split_book_number, VerseReference};
use super::{canonical_books, is_known_book};
use crate::constants::validation::{MAX_REFERENCE_LEN, MIN_REFERENCE_LEN, MIN_SUGGESTION_SCORE};
use crate::error::ParseError;

/// A single human-readable problem with a verse reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// Input is shorter than any real reference.
    #[error("reference is too short ({len} characters, at least {min} expected)")]
    TooShort {
        /// Character count of the input.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// Input is longer than any real reference.
    #[error("reference is too long ({len} characters, at most {max} allowed)")]
    TooLong {
        /// Character count of the input.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// Chapter and verse must be separated by exactly one colon.
    #[error("expected exactly one colon between chapter and verse, found {found}")]
    ColonCount {
        /// Number of colons present.
        found: usize,
    },

    /// A leading book number must be followed by a space ("1 John").
    #[error("book number must be followed by a space")]
    BookNumberSpacing,

    /// Book name and chapter must be separated by exactly one space.
    #[error("expected one space between book name and chapter, found {found}")]
    BookChapterSpacing {
        /// Number of spaces present.
        found: usize,
    },

    /// The book is not one of the 66 canonical books.
    #[error("unknown book {name:?}{}", .suggestion.map_or_else(String::new, |s| format!(" (did you mean {s}?)")))]
    UnknownBook {
        /// The book name as typed, with any number prefix.
        name: String,
        /// Closest canonical book, if any is close enough.
        suggestion: Option<&'static str>,
    },

    /// Any other structural problem found by the parser.
    #[error("{0}")]
    Malformed(ParseError),
}

/// Validate a user-typed reference, collecting every issue found.
pub fn validate(reference: &str) -> Result<VerseReference, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let len = reference.chars().count();
    if len < MIN_REFERENCE_LEN {
        issues.push(ValidationIssue::TooShort { len, min: MIN_REFERENCE_LEN });
    } else if len > MAX_REFERENCE_LEN {
        issues.push(ValidationIssue::TooLong { len, max: MAX_REFERENCE_LEN });
    }

    let colons = reference.matches(':').count();
    if colons != 1 {
        issues.push(ValidationIssue::ColonCount { found: colons });
    }

    let trimmed = reference.trim();
    let (book_number, without_number) = split_book_number(trimmed);
    if book_number.is_some() && !trimmed[1..].starts_with(' ') {
        issues.push(ValidationIssue::BookNumberSpacing);
    }

    // Spaces between the last letter of the book name and the chapter digits
    let name_len = book_name_len(without_number);
    let rest = &without_number[name_len..];
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        let name_part = &without_number[..name_len];
        let found = name_part.len() - name_part.trim_end_matches(' ').len();
        if found != 1 && !name_part.trim().is_empty() {
            issues.push(ValidationIssue::BookChapterSpacing { found });
        }
    }

    match parse(reference) {
        Ok(parsed) => {
            if !is_known_book(&parsed.full_book_name) {
                issues.push(ValidationIssue::UnknownBook {
                    suggestion: suggest_book(&parsed.full_book_name),
                    name: parsed.full_book_name.clone(),
                });
            }
            if issues.is_empty() {
                return Ok(parsed);
            }
        }
        // Already reported as a colon-count issue
        Err(ParseError::MissingColon { .. } | ParseError::ExtraColon { .. }) if colons != 1 => {}
        Err(e) => issues.push(ValidationIssue::Malformed(e)),
    }

    Err(issues)
}

/// Closest canonical book name by fuzzy match.
fn suggest_book(name: &str) -> Option<&'static str> {
    let matcher = SkimMatcherV2::default();
    let query = name.to_lowercase();
    canonical_books()
        .filter_map(|book| {
            matcher
                .fuzzy_match(&book.to_lowercase(), &query)
                .filter(|&score| score >= MIN_SUGGESTION_SCORE)
                .map(|score| (score, book))
        })
        .max_by_key(|&(score, _)| score)
        .map(|(_, book)| book)
}
