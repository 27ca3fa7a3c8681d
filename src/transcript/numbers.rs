//! Number spellings produced by speech recognizers.

/// Spelled-out form of numbers below ten.
const ONES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Spelled-out form of `n`, if recognizers are known to spell it.
pub fn spelled_out(n: u32) -> Option<&'static str> {
    usize::try_from(n).ok().and_then(|i| ONES.get(i)).copied()
}

/// Ordinal spellings that may stand in for a numeric book prefix.
///
/// Matching is case-insensitive, so only one casing is listed.
pub fn ordinal_spellings(book_number: u8) -> &'static [&'static str] {
    match book_number {
        1 => &["1st", "first"],
        2 => &["2nd", "second"],
        3 => &["3rd", "third"],
        _ => &[],
    }
}
