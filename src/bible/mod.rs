//! Canonical book order, testament classification and reference sorting.

pub mod curriculum;
pub mod reference;
pub mod validate;

use std::cmp::Ordering;
use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::ParseError;
pub use reference::{parse, VerseReference};
pub use validate::{validate, ValidationIssue};

/// Old Testament books in canonical order, using display names.
const OLD_TESTAMENT: [&str; 39] = [
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy", "Joshua", "Judges", "Ruth",
    "1 Samuel", "2 Samuel", "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalm", "Proverbs", "Ecclesiastes", "Song of Solomon",
    "Isaiah", "Jeremiah", "Lamentations", "Ezekiel", "Daniel", "Hosea", "Joel", "Amos",
    "Obadiah", "Jonah", "Micah", "Nahum", "Habakkuk", "Zephaniah", "Haggai", "Zechariah",
    "Malachi",
];

/// New Testament books in canonical order.
const NEW_TESTAMENT: [&str; 27] = [
    "Matthew", "Mark", "Luke", "John", "Acts", "Romans", "1 Corinthians", "2 Corinthians",
    "Galatians", "Ephesians", "Philippians", "Colossians", "1 Thessalonians",
    "2 Thessalonians", "1 Timothy", "2 Timothy", "Titus", "Philemon", "Hebrews", "James",
    "1 Peter", "2 Peter", "1 John", "2 John", "3 John", "Jude", "Revelation",
];

lazy_static! {
    /// Book name -> zero-based canonical position.
    static ref BOOK_POSITIONS: HashMap<&'static str, usize> = {
        let mut m: HashMap<&'static str, usize> = OLD_TESTAMENT
            .iter()
            .chain(NEW_TESTAMENT.iter())
            .enumerate()
            .map(|(i, &name)| (name, i))
            .collect();
        // Tolerated spellings
        m.insert("Psalms", m["Psalm"]);
        m.insert("Revelations", m["Revelation"]);
        m
    };
}

/// Testament a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Testament {
    /// Genesis through Malachi.
    Old,
    /// Matthew through Revelation.
    New,
}

impl Testament {
    /// Returns the upper-case label used by verse lists ("OLD"/"NEW").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Old => "OLD",
            Self::New => "NEW",
        }
    }
}

/// Iterate the 66 book display names in canonical order.
pub fn canonical_books() -> impl Iterator<Item = &'static str> {
    OLD_TESTAMENT.iter().chain(NEW_TESTAMENT.iter()).copied()
}

/// Zero-based canonical position of a full book name, aliases included.
pub fn book_position(full_book_name: &str) -> Option<usize> {
    BOOK_POSITIONS.get(full_book_name.trim()).copied()
}

/// Whether a full book name is canonical or a tolerated alias.
pub fn is_known_book(full_book_name: &str) -> bool {
    book_position(full_book_name).is_some()
}

/// Classify a book as Old or New Testament.
pub fn testament_of(full_book_name: &str) -> Option<Testament> {
    book_position(full_book_name).map(|pos| {
        if pos < OLD_TESTAMENT.len() {
            Testament::Old
        } else {
            Testament::New
        }
    })
}

/// Order two references by (book position, chapter, first verse).
///
/// Unknown books sort after every canonical book.
pub fn compare_book_order(a: &VerseReference, b: &VerseReference) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(r: &VerseReference) -> (usize, u32, u32) {
    (
        book_position(&r.full_book_name).unwrap_or(usize::MAX),
        r.chapter,
        r.verse_start,
    )
}

/// Parse, sort canonically and re-serialize a list of references.
///
/// Curated lists are expected to be well formed, so the first parse failure
/// is returned as-is.
pub fn sort_references<S: AsRef<str>>(references: &[S]) -> Result<Vec<String>, ParseError> {
    let mut parsed = references
        .iter()
        .map(|r| reference::parse(r.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    parsed.sort_by(compare_book_order);
    Ok(parsed.iter().map(ToString::to_string).collect())
}

/// References split by testament, each half in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestamentGroups {
    /// Old Testament references.
    pub old: Vec<VerseReference>,
    /// New Testament references.
    pub new: Vec<VerseReference>,
    /// References whose book is not in the canonical list.
    pub unknown: Vec<VerseReference>,
}

/// Group references by testament.
pub fn group_by_testament(references: impl IntoIterator<Item = VerseReference>) -> TestamentGroups {
    let mut groups = TestamentGroups::default();
    for r in references {
        match testament_of(&r.full_book_name) {
            Some(Testament::Old) => groups.old.push(r),
            Some(Testament::New) => groups.new.push(r),
            None => groups.unknown.push(r),
        }
    }
    groups.old.sort_by(compare_book_order);
    groups.new.sort_by(compare_book_order);
    groups
}
