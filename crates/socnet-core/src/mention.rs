//! `@username` extraction from free-text posts.
//!
//! A small lexical scan, not a parser. Rules:
//!
//! - An `@` starts a mention unless the character right before it is a
//!   backslash (`\@bob` is literal text).
//! - The mention is the maximal run of non-whitespace characters after the
//!   `@`. Punctuation is not stripped: `@bob,` mentions `bob,`.
//! - `@` may sit mid-word: `hi@bob` mentions `bob`.
//! - A lone `@` followed by whitespace or the end of the text yields nothing.
//!
//! Results keep text order and duplicates; the graph store collapses
//! repeats through its edge idempotency.

/// Extract every mentioned username from `text`, in order of appearance.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut mentions = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '@' || prev == Some('\\') {
            prev = Some(c);
            continue;
        }

        let start = i + c.len_utf8();
        let mut end = start;
        while let Some(&(j, next)) = chars.peek() {
            if next.is_whitespace() {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }

        if end > start {
            mentions.push(text[start..end].to_string());
        }
        prev = text[..end].chars().next_back();
    }

    mentions
}
