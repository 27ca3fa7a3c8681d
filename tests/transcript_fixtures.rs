//! Transcript repair against recognizer output collected from different
//! browsers and platforms.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use serde::Deserialize;
use versecheck::transcript::{NormalizationRequest, TranscriptNormalizer};

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    reference: String,
    transcript: String,
    expected: String,
}

fn cases() -> Vec<Case> {
    serde_json::from_str(include_str!("fixtures/transcripts.json")).unwrap()
}

#[test]
fn test_fixture_transcripts_are_repaired() {
    let normalizer = TranscriptNormalizer::new();
    let cases = cases();
    assert!(!cases.is_empty());

    for case in cases {
        let request = NormalizationRequest::new(case.transcript.as_str(), case.reference.as_str(), "");
        assert_eq!(normalizer.normalize(&request), case.expected, "case: {}", case.name);
    }
}

#[test]
fn test_repair_is_idempotent() {
    let normalizer = TranscriptNormalizer::new();
    for case in cases() {
        let once = normalizer.normalize(&NormalizationRequest::new(case.transcript.as_str(), case.reference.as_str(), ""));
        let twice = normalizer.normalize(&NormalizationRequest::new(once.as_str(), case.reference.as_str(), ""));
        assert_eq!(once, twice, "case: {}", case.name);
    }
}

#[test]
fn test_verse_text_does_not_change_the_result() {
    let normalizer = TranscriptNormalizer::new();
    let bare = NormalizationRequest::new("Genesis 11 In the beginning", "Genesis 1:1", "");
    let with_text = NormalizationRequest::new(
        "Genesis 11 In the beginning",
        "Genesis 1:1",
        "Genesis 1:1 In the beginning, God created the heavens and the earth. Genesis 1:1",
    );
    assert_eq!(normalizer.normalize(&bare), normalizer.normalize(&with_text));
}

#[test]
fn test_non_empty_transcript_never_comes_back_empty() {
    let normalizer = TranscriptNormalizer::new();
    let mut inputs: Vec<(String, String)> = cases().into_iter().map(|c| (c.transcript, c.reference)).collect();
    inputs.extend(
        [("Genesis", "Genesis 1:1"), ("one", "Genesis 1:1"), ("  ", "John 3:16"), ("Third", "3 John 1:4"), ("-", "not a reference")]
            .map(|(t, r)| (t.to_string(), r.to_string())),
    );

    for (transcript, reference) in inputs {
        let out = normalizer.normalize(&NormalizationRequest::new(transcript.as_str(), reference.as_str(), ""));
        assert!(!out.is_empty(), "{transcript:?} against {reference:?} came back empty");
    }
}
