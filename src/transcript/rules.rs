//! Repair rules for speech-recognition transcripts.
//!
//! Each rule looks for one way recognizers mangle a verse reference and
//! rewrites every occurrence into the canonical form. Rules anchor on the
//! book name without its number prefix, so a prefix repaired by an earlier
//! rule is left alone by later ones.

use regex::{NoExpand, RegexBuilder};

use super::numbers::{ordinal_spellings, spelled_out};
use crate::bible::VerseReference;
use crate::constants::transcript::{RANGE_DIVIDERS, SPELLED_NUMBER_LIMIT};

/// A single transcript rewrite.
///
/// Rules are independent; the normalizer runs them in a fixed order so
/// later rules can rely on earlier canonicalization.
pub trait RepairRule: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Rewrite the transcript, or `None` when the rule's pattern is absent.
    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String>;
}

/// The built-in rules in application order.
pub fn default_rules() -> Vec<Box<dyn RepairRule>> {
    vec![
        Box::new(OrdinalBookPrefix),
        Box::new(SpelledChapter),
        Box::new(SpelledVerseStart),
        Box::new(SpelledVerseEnd),
        Box::new(MissingColon),
        Box::new(RangeDivider),
    ]
}

/// Case-insensitively replace every match of `pattern`, if there is one.
fn replace_all_ci(transcript: &str, pattern: &str, replacement: &str) -> Option<String> {
    let re = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Skipping repair pattern {pattern:?}: {e}");
            return None;
        }
    };
    re.is_match(transcript)
        .then(|| re.replace_all(transcript, NoExpand(replacement)).into_owned())
}

fn spelled_below_limit(n: u32) -> Option<&'static str> {
    (n < SPELLED_NUMBER_LIMIT).then(|| spelled_out(n)).flatten()
}

fn book(reference: &VerseReference) -> String {
    regex::escape(&reference.book_name)
}

fn canonical_range(reference: &VerseReference) -> String {
    format!(
        "{} {}:{}-{}",
        reference.book_name, reference.chapter, reference.verse_start, reference.verse_end
    )
}

/// "First John" / "1st John" -> "1 John".
pub struct OrdinalBookPrefix;

impl RepairRule for OrdinalBookPrefix {
    fn name(&self) -> &'static str {
        "ordinal-book-prefix"
    }

    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String> {
        let ordinals = ordinal_spellings(reference.book_number?)
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\b(?:{ordinals})\s+{}\b", book(reference));
        replace_all_ci(transcript, &pattern, &reference.full_book_name)
    }
}

/// "Genesis one" -> "Genesis 1".
pub struct SpelledChapter;

impl RepairRule for SpelledChapter {
    fn name(&self) -> &'static str {
        "spelled-chapter"
    }

    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String> {
        let word = spelled_below_limit(reference.chapter)?;
        let pattern = format!(r"\b{}\s+{word}\b", book(reference));
        let replacement = format!("{} {}", reference.book_name, reference.chapter);
        replace_all_ci(transcript, &pattern, &replacement)
    }
}

/// "Genesis 1 one" / "Genesis 1:one" -> "Genesis 1:1".
pub struct SpelledVerseStart;

impl RepairRule for SpelledVerseStart {
    fn name(&self) -> &'static str {
        "spelled-verse-start"
    }

    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String> {
        let word = spelled_below_limit(reference.verse_start)?;
        let pattern = format!(r"\b{}\s+{}[:\s]?{word}\b", book(reference), reference.chapter);
        let replacement = format!(
            "{} {}:{}",
            reference.book_name, reference.chapter, reference.verse_start
        );
        replace_all_ci(transcript, &pattern, &replacement)
    }
}

/// "John 1:1 through three" -> "John 1:1-3".
pub struct SpelledVerseEnd;

impl RepairRule for SpelledVerseEnd {
    fn name(&self) -> &'static str {
        "spelled-verse-end"
    }

    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String> {
        if !reference.is_range() {
            return None;
        }
        let word = spelled_below_limit(reference.verse_end)?;
        let pattern = format!(
            r"\b{}\s+{}[:\s]?{}\s+[-a-z]+\s+{word}\b",
            book(reference),
            reference.chapter,
            reference.verse_start
        );
        replace_all_ci(transcript, &pattern, &canonical_range(reference))
    }
}

/// "Genesis 11" / "Genesis 1 1" -> "Genesis 1:1".
///
/// Only the first verse is repaired; range ends are left to [`RangeDivider`].
pub struct MissingColon;

impl RepairRule for MissingColon {
    fn name(&self) -> &'static str {
        "missing-colon"
    }

    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String> {
        let pattern = format!(
            r"\b{}\s+{}\s?{}\b",
            book(reference),
            reference.chapter,
            reference.verse_start
        );
        let replacement = format!(
            "{} {}:{}",
            reference.book_name, reference.chapter, reference.verse_start
        );
        replace_all_ci(transcript, &pattern, &replacement)
    }
}

/// "John 1:1 to 3" / "John 1:1 through 3" / "John 1:123" -> "John 1:1-3".
pub struct RangeDivider;

impl RepairRule for RangeDivider {
    fn name(&self) -> &'static str {
        "range-divider"
    }

    fn apply(&self, transcript: &str, reference: &VerseReference) -> Option<String> {
        if !reference.is_range() {
            return None;
        }
        let dividers = RANGE_DIVIDERS
            .iter()
            .map(|d| regex::escape(d).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"\b{}\s+{}[:\s]?{}(?:{dividers}){}\b",
            book(reference),
            reference.chapter,
            reference.verse_start,
            reference.verse_end
        );
        replace_all_ci(transcript, &pattern, &canonical_range(reference))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::parse;

    fn run(rule: &dyn RepairRule, transcript: &str, reference: &str) -> Option<String> {
        rule.apply(transcript, &parse(reference).unwrap())
    }

    #[test]
    fn test_ordinal_prefix() {
        assert_eq!(
            run(&OrdinalBookPrefix, "First John 1:9 If we confess", "1 John 1:9").as_deref(),
            Some("1 John 1:9 If we confess")
        );
        assert_eq!(
            run(&OrdinalBookPrefix, "2nd corinthians 5:17", "2 Corinthians 5:17").as_deref(),
            Some("2 Corinthians 5:17")
        );
        assert_eq!(run(&OrdinalBookPrefix, "first John", "John 1:1"), None);
    }

    #[test]
    fn test_spelled_chapter() {
        assert_eq!(
            run(&SpelledChapter, "Genesis One:1 In the beginning", "Genesis 1:1").as_deref(),
            Some("Genesis 1:1 In the beginning")
        );
        assert_eq!(run(&SpelledChapter, "Genesis 1:1", "Genesis 1:1"), None);
        assert_eq!(run(&SpelledChapter, "John three", "John 13:1"), None);
    }

    #[test]
    fn test_spelled_verse_start() {
        assert_eq!(
            run(&SpelledVerseStart, "Joshua 1 nine Have I not", "Joshua 1:9").as_deref(),
            Some("Joshua 1:9 Have I not")
        );
        assert_eq!(
            run(&SpelledVerseStart, "joshua 1:nine", "Joshua 1:9").as_deref(),
            Some("Joshua 1:9")
        );
    }

    #[test]
    fn test_spelled_verse_end() {
        assert_eq!(
            run(&SpelledVerseEnd, "John 1:1 through three In the beginning", "John 1:1-3").as_deref(),
            Some("John 1:1-3 In the beginning")
        );
        assert_eq!(run(&SpelledVerseEnd, "John 1:1 through three", "John 1:1"), None);
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            run(&MissingColon, "Genesis 11 In the beginning", "Genesis 1:1").as_deref(),
            Some("Genesis 1:1 In the beginning")
        );
        assert_eq!(
            run(&MissingColon, "John 3 16 For God", "John 3:16").as_deref(),
            Some("John 3:16 For God")
        );
        assert_eq!(run(&MissingColon, "Genesis 110", "Genesis 1:1"), None);
        assert_eq!(run(&MissingColon, "Genesis 1:1", "Genesis 1:1"), None);
    }

    #[test]
    fn test_range_divider() {
        for transcript in ["Proverbs 3:5 to 6", "Proverbs 3:5 through 6", "Proverbs 3:526", "proverbs 3 5 to 6"] {
            assert_eq!(
                run(&RangeDivider, transcript, "Proverbs 3:5-6").as_deref(),
                Some("Proverbs 3:5-6"),
                "{transcript}"
            );
        }
        assert_eq!(run(&RangeDivider, "Proverbs 3:5-6", "Proverbs 3:5-6"), None);
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<_> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "ordinal-book-prefix",
                "spelled-chapter",
                "spelled-verse-start",
                "spelled-verse-end",
                "missing-colon",
                "range-divider",
            ]
        );
    }
}
