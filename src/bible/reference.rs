//! Verse reference parsing.
//!
//! Turns strings like "2 Corinthians 5:17-18" into a [`VerseReference`].
//! Book names are not checked here; see [`crate::bible::validate`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A parsed verse reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseReference {
    /// Numeric prefix for books like "2 Corinthians".
    pub book_number: Option<u8>,
    /// Book name without the numeric prefix (e.g. "Corinthians").
    pub book_name: String,
    /// Display and lookup name (e.g. "2 Corinthians", "Song of Solomon").
    pub full_book_name: String,
    /// Chapter number.
    pub chapter: u32,
    /// First verse.
    pub verse_start: u32,
    /// Last verse (same as start for a single verse).
    pub verse_end: u32,
}

impl VerseReference {
    /// Number of verses covered.
    #[must_use]
    pub const fn verse_count(&self) -> u32 {
        1 + self.verse_end.saturating_sub(self.verse_start)
    }

    /// Whether the reference spans more than one verse.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        self.verse_end > self.verse_start
    }

    /// The first verse alone, e.g. "John 1:1" for "John 1:1-3".
    pub fn single_verse(&self) -> String {
        format!("{} {}:{}", self.full_book_name, self.chapter, self.verse_start)
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.full_book_name, self.chapter, self.verse_start)?;
        if self.is_range() {
            write!(f, "-{}", self.verse_end)?;
        }
        Ok(())
    }
}

impl FromStr for VerseReference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Split a leading "1 ", "2 " or "3 " book number off the reference.
pub(crate) fn split_book_number(reference: &str) -> (Option<u8>, &str) {
    let mut chars = reference.chars();
    match chars.next().and_then(|c| c.to_digit(10)) {
        Some(d @ 1..=3) => (u8::try_from(d).ok(), chars.as_str().trim_start()),
        _ => (None, reference),
    }
}

/// Length in bytes of the leading book-name run (letters and spaces).
pub(crate) fn book_name_len(text: &str) -> usize {
    text.find(|c: char| !(c.is_alphabetic() || c == ' '))
        .unwrap_or(text.len())
}

/// Parse a verse reference like "John 3:16" or "1 John 3:1-3".
pub fn parse(reference: &str) -> Result<VerseReference, ParseError> {
    let trimmed = reference.trim();
    let (book_number, without_number) = split_book_number(trimmed);

    let name_len = book_name_len(without_number);
    let book_name = without_number[..name_len].trim();
    if book_name.is_empty() {
        return Err(ParseError::MissingBookName { reference: reference.to_string() });
    }

    let rest = without_number[name_len..].trim();
    let Some((chapter_part, verse_part)) = rest.split_once(':') else {
        return Err(ParseError::MissingColon { reference: reference.to_string() });
    };
    if verse_part.contains(':') {
        return Err(ParseError::ExtraColon { reference: reference.to_string() });
    }

    let chapter = parse_number(chapter_part, reference)?;
    let (verse_start, verse_end) = match verse_part.split_once('-') {
        Some((start, end)) => (parse_number(start, reference)?, parse_number(end, reference)?),
        None => {
            let verse = parse_number(verse_part, reference)?;
            (verse, verse)
        }
    };
    if verse_end < verse_start {
        return Err(ParseError::InvertedRange { start: verse_start, end: verse_end });
    }

    let full_book_name = book_number.map_or_else(
        || book_name.to_string(),
        |n| format!("{n} {book_name}"),
    );

    Ok(VerseReference {
        book_number,
        book_name: book_name.to_string(),
        full_book_name,
        chapter,
        verse_start,
        verse_end,
    })
}

fn parse_number(segment: &str, reference: &str) -> Result<u32, ParseError> {
    match segment.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidNumber {
            segment: segment.trim().to_string(),
            reference: reference.to_string(),
        }),
    }
}
