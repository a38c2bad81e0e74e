//! Sentence and word tokenization.
//!
//! Splitting is purely lexical. Sentences are the trimmed fragments between
//! runs of `.`, `!` and `?`; words are lowercase runs of ASCII word characters.
//! Lengths are counted in characters, never bytes.

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Sentences must be longer than this to feed the summary.
pub const SUMMARY_MIN_SENTENCE_CHARS: usize = 10;

/// Sentences must be longer than this to feed the quiz.
pub const QUIZ_MIN_SENTENCE_CHARS: usize = 15;

/// Words must be longer than this to be counted for keyword ranking.
pub const MIN_WORD_CHARS: usize = 3;

/// Split `text` into trimmed sentences longer than `min_chars` characters.
///
/// The returned iterator is lazy and cheap to clone, so callers can walk it
/// more than once. Duplicate sentences are kept.
pub fn sentences(text: &str, min_chars: usize) -> impl Iterator<Item = &str> + Clone + '_ {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(move |sentence| char_len(sentence) > min_chars)
}

/// Lowercased word tokens longer than [`MIN_WORD_CHARS`], in text order.
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|word| char_len(word) > MIN_WORD_CHARS)
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cap `s` at `max_chars` characters, replacing the tail with `...` when cut.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    const ELLIPSIS: &str = "...";

    if char_len(s) <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
