//! Text utilities for line-oriented asset formats
//!
//! Small helpers used by the model parser: trimming a set of characters
//! from both ends of a line, and splitting on separator characters either
//! collapsing runs of separators or treating each one individually.

/// Characters stripped from both ends of every model line
pub const LINE_IGNORE: &str = " \t\r\n";

/// Separators between the tokens of a record
pub const TOKEN_SEPARATORS: &str = " \t";

/// Separator between the indices of a face corner descriptor
pub const CORNER_SEPARATOR: &str = "/";

/// Trim every character contained in `chars` from both ends of `s`
pub fn trim_any<'a>(s: &'a str, chars: &str) -> &'a str {
    s.trim_matches(|c: char| chars.contains(c))
}

/// Split `s` on runs of separator characters
///
/// Consecutive separators count as one split point, so `"f  1 2"` yields
/// three tokens. A leading separator run produces an empty first token and a
/// trailing run produces an empty last token; callers are expected to trim
/// first.
pub fn split_runs<'a>(s: &'a str, separators: &str) -> Vec<&'a str> {
    let mut output = Vec::new();
    let mut start = 0;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if separators.contains(c) {
            output.push(&s[start..i]);
            // Skip the rest of the run
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !separators.contains(next) {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }
            start = end;
        }
    }
    output.push(&s[start..]);
    output
}

/// Split `s` at every single separator character
///
/// Adjacent separators produce empty tokens, which is how `1//3` keeps its
/// empty texture coordinate slot.
pub fn split_each<'a>(s: &'a str, separators: &str) -> Vec<&'a str> {
    s.split(|c: char| separators.contains(c)).collect()
}
