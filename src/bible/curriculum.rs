//! Built-in memory verse sets.

use serde::Serialize;

use super::reference::{parse, VerseReference};
use crate::error::ParseError;

/// A named, curated list of verse references.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VerseSet {
    /// Short identifier used on the command line.
    pub id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// References in teaching order.
    pub references: &'static [&'static str],
}

impl VerseSet {
    /// Parse every reference in the set.
    ///
    /// A failure here means the list itself was mistyped.
    pub fn parsed(&self) -> Result<Vec<VerseReference>, ParseError> {
        self.references.iter().map(|r| parse(r)).collect()
    }
}

/// First verses most memorization plans begin with.
pub const STARTER: VerseSet = VerseSet {
    id: "starter",
    title: "Starter verses",
    references: &[
        "John 3:16",
        "Romans 3:23",
        "Romans 6:23",
        "Ephesians 2:8-9",
        "Genesis 1:1",
        "Psalm 119:105",
        "Proverbs 3:5-6",
        "Philippians 4:13",
        "Joshua 1:9",
        "1 John 1:9",
    ],
};

/// Verses on God's faithfulness and promises.
pub const PROMISES: VerseSet = VerseSet {
    id: "promises",
    title: "Promises",
    references: &[
        "Psalm 9:10",
        "Deuteronomy 7:9",
        "2 Peter 3:9",
        "Isaiah 40:31",
        "Jeremiah 29:11",
        "Lamentations 3:22-23",
        "Romans 8:28",
        "2 Corinthians 5:17",
        "Hebrews 13:5",
        "1 Corinthians 10:13",
    ],
};

/// Every built-in set.
pub const ALL: &[VerseSet] = &[STARTER, PROMISES];

/// Look up a set by id.
pub fn find(id: &str) -> Option<&'static VerseSet> {
    ALL.iter().find(|set| set.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::validate;

    #[test]
    fn test_every_curated_reference_validates() {
        for set in ALL {
            for r in set.references {
                assert!(validate(r).is_ok(), "{} in {} is malformed", r, set.id);
            }
        }
    }

    #[test]
    fn test_find_set() {
        assert_eq!(find("PROMISES").map(|s| s.title), Some("Promises"));
        assert!(find("missing").is_none());
    }

    #[test]
    fn test_parsed_set() {
        let parsed = STARTER.parsed().unwrap();
        assert_eq!(parsed.len(), STARTER.references.len());
        assert_eq!(parsed[3].verse_count(), 2);
    }
}
