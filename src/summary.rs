//! Summary struct and the extractive summarizer that builds it.
//!
//! A summary is a title, up to ten key points and up to five headed
//! paragraphs, all cut from sentences that mention one of the document's
//! most frequent words.

use crate::keywords::{self, Keyword};
pub use crate::paragraphs::Paragraph;
use crate::paragraphs::group_paragraphs;
use crate::text::{self, capitalize, char_len, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on key points, and on sentences selected for a summary.
pub const MAX_KEY_POINTS: usize = 10;

/// Key points longer than this are cut with an ellipsis.
pub const KEY_POINT_MAX_CHARS: usize = 150;

/// Summary density used when the caller does not choose one.
pub const DEFAULT_LENGTH: u32 = 50;

/// Leading lines inspected when looking for a title.
const TITLE_LINES: usize = 10;

/// Keywords joined for the fallback title.
const TITLE_KEYWORDS: usize = 3;

/// Structured summary of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Title or headline for the summarized content
    pub title: String,
    /// Main takeaways, in document order
    pub key_points: Vec<String>,
    /// Key sentences grouped under short headings
    pub paragraphs: Vec<Paragraph>,
}

impl Summary {
    /// Create a new summary
    pub fn new(title: String, key_points: Vec<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            title,
            key_points,
            paragraphs,
        }
    }

    /// Check if the summary has any content
    pub fn is_empty(&self) -> bool {
        self.key_points.is_empty() && self.paragraphs.is_empty()
    }
}

/// Summarize `text`.
///
/// `length` is the desired density as a percentage of the document's
/// sentences; values above 100 are treated as 100. Text without any
/// keyword-bearing sentence produces empty key points and paragraphs.
pub fn summarize(text: &str, length: u32) -> Summary {
    let sentences: Vec<&str> = text::sentences(text, text::SUMMARY_MIN_SENTENCE_CHARS).collect();
    let keywords = keywords::rank_keywords(text);
    let title = generate_title(text, &keywords);
    let key_sentences = select_key_sentences(&sentences, &keywords, length);

    debug!(
        sentences = sentences.len(),
        keywords = keywords.len(),
        selected = key_sentences.len(),
        "summarized document"
    );

    Summary::new(
        title,
        key_sentences.iter().map(|s| key_point(s)).collect(),
        group_paragraphs(&key_sentences),
    )
}

/// Pick a title for `text`.
///
/// The first fragment of the leading lines wins when it is between 10 and
/// 100 characters long; otherwise the top three keywords are joined.
pub fn generate_title(text: &str, keywords: &[Keyword]) -> String {
    let leading = text.split('\n').take(TITLE_LINES).collect::<Vec<_>>().join(" ");
    let candidate = leading
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim();

    let candidate_len = char_len(candidate);
    if candidate_len > 10 && candidate_len < 100 {
        return capitalize(candidate);
    }

    let fallback = keywords
        .iter()
        .take(TITLE_KEYWORDS)
        .map(|k| k.word.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    capitalize(&fallback)
}

/// Number of sentences a summary of `length` percent may keep.
pub fn sentence_budget(total_sentences: usize, length: u32) -> usize {
    let length = length.min(100) as usize;
    MAX_KEY_POINTS.min((total_sentences * length).div_ceil(100))
}

/// Sentences mentioning at least one keyword, in order, capped by [`sentence_budget`].
///
/// Matching is a case-insensitive substring test, so `cat` also matches
/// `concatenate`.
pub fn select_key_sentences<'a>(
    sentences: &[&'a str],
    keywords: &[Keyword],
    length: u32,
) -> Vec<&'a str> {
    let budget = sentence_budget(sentences.len(), length);
    sentences
        .iter()
        .copied()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.word.as_str()))
        })
        .take(budget)
        .collect()
}

fn key_point(sentence: &str) -> String {
    capitalize(&truncate_with_ellipsis(sentence.trim(), KEY_POINT_MAX_CHARS))
}
