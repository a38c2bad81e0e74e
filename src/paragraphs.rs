//! Grouping of key sentences into headed paragraphs.

use crate::text::{capitalize, char_len};
use serde::{Deserialize, Serialize};

/// Upper bound on paragraphs per summary.
pub const MAX_PARAGRAPHS: usize = 5;

/// Nominal sentences per paragraph, used to size the paragraph count.
pub const SENTENCES_PER_PARAGRAPH: usize = 3;

const HEADING_WORDS: usize = 3;
const MIN_HEADING_WORD_CHARS: usize = 3;

/// A headed block of summary text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub heading: String,
    pub content: String,
}

impl Paragraph {
    /// Build a paragraph from consecutive sentences.
    ///
    /// The heading is the first three words longer than three characters of
    /// the leading sentence. It is empty when that sentence has none.
    fn from_batch(batch: &[&str]) -> Self {
        let heading = batch
            .first()
            .map(|first| {
                first
                    .split(' ')
                    .filter(|word| char_len(word) > MIN_HEADING_WORD_CHARS)
                    .take(HEADING_WORDS)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        Self {
            heading: capitalize(&heading),
            content: capitalize(&batch.join(" ")),
        }
    }
}

/// Number of paragraphs `sentence_count` key sentences are split into.
pub fn paragraph_count(sentence_count: usize) -> usize {
    MAX_PARAGRAPHS.min(sentence_count.div_ceil(SENTENCES_PER_PARAGRAPH))
}

/// Partition `sentences` into at most [`MAX_PARAGRAPHS`] paragraphs, in order.
///
/// Each round takes `ceil(remaining / rounds_left)` sentences, so earlier
/// paragraphs are never smaller than later ones.
pub fn group_paragraphs(sentences: &[&str]) -> Vec<Paragraph> {
    let target = paragraph_count(sentences.len());
    let mut paragraphs = Vec::with_capacity(target);
    let mut cursor = 0;

    for round in 0..target {
        let remaining = sentences.len() - cursor;
        if remaining == 0 {
            break;
        }
        let take = remaining.div_ceil(target - round);
        paragraphs.push(Paragraph::from_batch(&sentences[cursor..cursor + take]));
        cursor += take;
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Sentence number {i} talks")).collect()
    }

    fn sizes(n: usize) -> Vec<usize> {
        let owned = numbered(n);
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        group_paragraphs(&refs)
            .iter()
            .map(|p| p.content.matches("Sentence").count())
            .collect()
    }

    #[test]
    fn batches_are_front_loaded() {
        assert_eq!(sizes(0), Vec::<usize>::new());
        assert_eq!(sizes(1), vec![1]);
        assert_eq!(sizes(4), vec![2, 2]);
        assert_eq!(sizes(7), vec![3, 2, 2]);
        assert_eq!(sizes(10), vec![3, 3, 2, 2]);
    }

    #[test]
    fn caps_at_five_paragraphs() {
        assert_eq!(sizes(20), vec![4, 4, 4, 4, 4]);
        assert_eq!(sizes(22).len(), MAX_PARAGRAPHS);
        assert_eq!(sizes(22).iter().sum::<usize>(), 22);
    }

    #[test]
    fn heading_uses_first_long_words() {
        let paragraphs = group_paragraphs(&["the data pipeline is a fast system", "more text"]);
        assert_eq!(paragraphs[0].heading, "Data pipeline fast");
        assert_eq!(
            paragraphs[0].content,
            "The data pipeline is a fast system more text"
        );
    }

    #[test]
    fn heading_may_be_empty() {
        let paragraphs = group_paragraphs(&["it is a big cat on the mat"]);
        assert_eq!(paragraphs[0].heading, "");
    }
}
