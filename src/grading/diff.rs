//! Word-level diff between a recitation and the verse text.

use serde::Serialize;

use crate::constants::grading::{MAX_LCS_CELLS, WORD_DASHES};

/// One run of a word diff.
///
/// `added` marks words in the verse the reciter missed; `removed` marks
/// words the reciter said that are not in the verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffPart {
    /// The words of this run, with their punctuation.
    pub text: String,
    /// Present in the verse, missing from the recitation.
    pub added: bool,
    /// Present in the recitation, missing from the verse.
    pub removed: bool,
}

/// Diff parts plus the counts grading is based on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Runs in reading order.
    pub parts: Vec<DiffPart>,
    /// Words the verse contains.
    pub word_count: usize,
    /// Missed plus extra words.
    pub error_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Common,
    Added,
    Removed,
}

#[derive(Debug)]
struct Token<'a> {
    text: &'a str,
    key: String,
    /// Written without a space before it.
    attached: bool,
}

impl Token<'_> {
    fn is_punctuation(&self) -> bool {
        !self.text.chars().any(char::is_alphanumeric)
    }
}

/// Split text into words and standalone punctuation marks.
///
/// Punctuation inside a word ("3:16", "don't") stays with the word. Dashes
/// joining two words ("world—that", "well-being") become their own tokens.
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let mut attached = false;
        for piece in split_at_dashes(chunk) {
            push_piece(&mut tokens, piece, attached);
            attached = true;
        }
    }
    tokens
}

/// Break a whitespace chunk at word-joining dashes, keeping each dash.
fn split_at_dashes(chunk: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = chunk.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let splits = WORD_DASHES.contains(&c)
            || (c == '-' && prev.is_some_and(char::is_alphabetic) && next.is_some_and(char::is_alphabetic));
        if splits {
            if i > start {
                pieces.push(&chunk[start..i]);
            }
            pieces.push(&chunk[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    if start < chunk.len() {
        pieces.push(&chunk[start..]);
    }
    pieces
}

/// Push a dash-free piece as leading punctuation, the word, then trailing
/// punctuation.
fn push_piece<'a>(tokens: &mut Vec<Token<'a>>, piece: &'a str, mut attached: bool) {
    let core_start = piece.find(char::is_alphanumeric).unwrap_or(piece.len());
    let core_end = piece
        .rfind(char::is_alphanumeric)
        .map_or(core_start, |i| i + piece[i..].chars().next().map_or(1, char::len_utf8));

    for (i, c) in piece[..core_start].char_indices() {
        tokens.push(make_token(&piece[i..i + c.len_utf8()], attached));
        attached = true;
    }
    if core_end > core_start {
        tokens.push(make_token(&piece[core_start..core_end], attached));
    }
    for (i, c) in piece[core_end.max(core_start)..].char_indices() {
        let start = core_end.max(core_start) + i;
        tokens.push(make_token(&piece[start..start + c.len_utf8()], true));
    }
}

fn make_token(text: &str, attached: bool) -> Token<'_> {
    Token {
        text,
        key: text.to_lowercase().replace('\u{2019}', "'"),
        attached,
    }
}

/// Case-insensitive longest-common-subsequence alignment.
///
/// On ties a removal is emitted before an addition. The shared prefix and
/// suffix are matched directly; a middle too large for the LCS table is
/// reported as removed then added.
fn align<'a>(recited: &'a [Token<'a>], canonical: &'a [Token<'a>]) -> Vec<(Op, &'a Token<'a>)> {
    let prefix = recited
        .iter()
        .zip(canonical)
        .take_while(|(r, c)| r.key == c.key)
        .count();
    let suffix = recited[prefix..]
        .iter()
        .rev()
        .zip(canonical[prefix..].iter().rev())
        .take_while(|(r, c)| r.key == c.key)
        .count();
    let recited_mid = &recited[prefix..recited.len() - suffix];
    let canonical_mid = &canonical[prefix..canonical.len() - suffix];

    let mut ops = Vec::with_capacity(recited.len() + canonical.len());
    ops.extend(canonical[..prefix].iter().map(|t| (Op::Common, t)));

    let cells = (recited_mid.len() + 1).saturating_mul(canonical_mid.len() + 1);
    if cells > MAX_LCS_CELLS {
        tracing::warn!(
            recited = recited_mid.len(),
            canonical = canonical_mid.len(),
            "Recitation too long to align word by word"
        );
        ops.extend(recited_mid.iter().map(|t| (Op::Removed, t)));
        ops.extend(canonical_mid.iter().map(|t| (Op::Added, t)));
    } else {
        align_lcs(recited_mid, canonical_mid, &mut ops);
    }

    ops.extend(canonical[canonical.len() - suffix..].iter().map(|t| (Op::Common, t)));
    ops
}

fn align_lcs<'a>(recited: &'a [Token<'a>], canonical: &'a [Token<'a>], ops: &mut Vec<(Op, &'a Token<'a>)>) {
    let (n, m) = (recited.len(), canonical.len());
    let width = m + 1;
    let mut lcs = vec![0_u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if recited[i].key == canonical[j].key {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if recited[i].key == canonical[j].key {
            ops.push((Op::Common, &canonical[j]));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            ops.push((Op::Removed, &recited[i]));
            i += 1;
        } else {
            ops.push((Op::Added, &canonical[j]));
            j += 1;
        }
    }
    ops.extend(recited[i..].iter().map(|t| (Op::Removed, t)));
    ops.extend(canonical[j..].iter().map(|t| (Op::Added, t)));
}

/// Join a run back into text. Punctuation that closed the previous run is
/// left off.
fn render(tokens: &[&Token<'_>]) -> String {
    let mut text = String::new();
    let leading = tokens
        .iter()
        .take_while(|t| t.attached && t.is_punctuation())
        .count();
    for (i, token) in tokens[leading..].iter().enumerate() {
        if i > 0 && !token.attached {
            text.push(' ');
        }
        text.push_str(token.text);
    }
    text
}

/// Diff a recitation against the canonical text and count its errors.
///
/// Both sides are expected to already be framed with the reference.
/// Runs made only of punctuation are dropped. Empty input on either side
/// yields an empty summary.
pub fn score(recited: &str, canonical: &str) -> DiffSummary {
    if recited.trim().is_empty() || canonical.trim().is_empty() {
        return DiffSummary::default();
    }

    let recited_tokens = tokenize(recited);
    let canonical_tokens = tokenize(canonical);
    let ops = align(&recited_tokens, &canonical_tokens);

    let mut summary = DiffSummary::default();
    for run in ops.chunk_by(|a, b| a.0 == b.0) {
        let op = run[0].0;
        let tokens: Vec<&Token<'_>> = run.iter().map(|(_, t)| *t).collect();
        let words = tokens.iter().filter(|t| !t.is_punctuation()).count();
        if words == 0 {
            continue;
        }

        if op != Op::Removed {
            summary.word_count += words;
        }
        if op != Op::Common {
            summary.error_count += words;
        }
        let (added, removed) = (op == Op::Added, op == Op::Removed);
        let text = render(&tokens);
        // A dropped punctuation run can leave two runs of the same kind adjacent
        match summary.parts.last_mut() {
            Some(last) if last.added == added && last.removed == removed => {
                last.text.push(' ');
                last.text.push_str(&text);
            }
            _ => summary.parts.push(DiffPart { text, added, removed }),
        }
    }
    summary
}

/// Diff parts only.
pub fn word_diff(recited: &str, canonical: &str) -> Vec<DiffPart> {
    score(recited, canonical).parts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn part(text: &str, added: bool, removed: bool) -> DiffPart {
        DiffPart { text: text.into(), added, removed }
    }

    #[test]
    fn test_missed_word() {
        let summary = score("Jesus wept", "Jesus wept loudly");
        assert_eq!(summary.parts, vec![part("Jesus wept", false, false), part("loudly", true, false)]);
        assert_eq!(summary.word_count, 3);
        assert_eq!(summary.error_count, 1);
    }

    #[test]
    fn test_extra_word() {
        let summary = score("Jesus really wept", "Jesus wept");
        assert_eq!(
            summary.parts,
            vec![part("Jesus", false, false), part("really", false, true), part("wept", false, false)]
        );
        assert_eq!(summary.word_count, 2);
        assert_eq!(summary.error_count, 1);
    }

    #[test]
    fn test_substitution_lists_removal_first() {
        let summary = score("the Lord is my shepherd", "the Lord is my keeper");
        assert_eq!(
            summary.parts,
            vec![
                part("the Lord is my", false, false),
                part("shepherd", false, true),
                part("keeper", true, false),
            ]
        );
        assert_eq!(summary.word_count, 5);
        assert_eq!(summary.error_count, 2);
    }

    #[test]
    fn test_case_and_punctuation_are_ignored() {
        let summary = score(
            "john 11:35 jesus wept john 11:35",
            "John 11:35 \u{b6} Jesus wept. John 11:35",
        );
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.word_count, 6);
        assert!(summary.parts.iter().all(|p| !p.added && !p.removed));
    }

    #[test]
    fn test_curly_apostrophe_matches_straight() {
        let summary = score("the Lord's prayer", "the Lord\u{2019}s prayer");
        assert_eq!(summary.error_count, 0);
    }

    #[test]
    fn test_punctuation_kept_in_rendered_text() {
        let parts = word_diff("in the beginning God", "\u{201c}In the beginning, God created.");
        assert_eq!(
            parts,
            vec![part("In the beginning God", false, false), part("created.", true, false)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(score("", "Jesus wept"), DiffSummary::default());
        assert_eq!(score("Jesus wept", "   "), DiffSummary::default());
    }

    #[test]
    fn test_em_dash_between_words() {
        let summary = score(
            "John 3:16 For God so loved the world that he gave John 3:16",
            "John 3:16 For God so loved the world\u{2014}that he gave John 3:16",
        );
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.word_count, 13);
        assert_eq!(
            summary.parts,
            vec![part("John 3:16 For God so loved the world that he gave John 3:16", false, false)]
        );
    }

    #[test]
    fn test_hyphenated_words_split_but_ranges_do_not() {
        let summary = score("the well being of all", "the well-being of all");
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.word_count, 5);

        let tokens: Vec<_> = tokenize("well-being 1:1-3 en\u{2013}dash").into_iter().map(|t| t.text).collect();
        assert_eq!(tokens, vec!["well", "-", "being", "1:1-3", "en", "\u{2013}", "dash"]);
    }

    #[test]
    fn test_joining_dash_is_left_off_a_missed_word() {
        let parts = word_diff("the world", "the world\u{2014}that");
        assert_eq!(parts, vec![part("the world", false, false), part("that", true, false)]);
    }

    #[test]
    fn test_oversized_middle_is_not_aligned() {
        let recited: Vec<String> = (0..2100).map(|i| format!("said{i}")).collect();
        let canonical: Vec<String> = (0..2100).map(|i| format!("verse{i}")).collect();
        let summary = score(
            &format!("John 3:16 {} John 3:16", recited.join(" ")),
            &format!("John 3:16 {} John 3:16", canonical.join(" ")),
        );
        assert_eq!(summary.error_count, 4200);
        assert_eq!(summary.word_count, 2104);
        assert_eq!(summary.parts.len(), 4);
        assert!(summary.parts[1].removed);
        assert!(summary.parts[2].added);
    }

    #[test]
    fn test_long_recitation_with_one_slip() {
        let words: Vec<String> = (0..5000).map(|i| format!("w{i}")).collect();
        let canonical = words.join(" ");
        let mut recited = words.clone();
        recited[2500] = "slip".into();
        let summary = score(&recited.join(" "), &canonical);
        assert_eq!(summary.error_count, 2);
        assert_eq!(summary.word_count, 5000);
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<_> = tokenize("\u{201c}Don't fear,\u{201d} 3:16").into_iter().map(|t| t.text).collect();
        assert_eq!(tokens, vec!["\u{201c}", "Don't", "fear", ",", "\u{201d}", "3:16"]);
    }
}
