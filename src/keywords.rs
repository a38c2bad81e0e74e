//! Word frequency counting and keyword ranking.
//!
//! Relevance is raw term frequency within the one document; there is no
//! reference corpus to weigh it against.

use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Size of the keyword working set.
pub const TOP_KEYWORDS: usize = 20;

/// A ranked word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
}

/// Occurrence counts for normalized words.
///
/// First-seen order is remembered so ranking ties resolve the same way on
/// every run.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencies {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl WordFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every word yielded by `words`
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frequencies = Self::new();
        for word in words {
            frequencies.add(word.as_ref());
        }
        frequencies
    }

    /// Record one occurrence of `word`
    pub fn add(&mut self, word: &str) {
        match self.counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.order.push(word.to_string());
                self.counts.insert(word.to_string(), 1);
            }
        }
    }

    /// Occurrences of `word`, zero if never seen
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The `limit` most frequent words, by descending count.
    ///
    /// The sort is stable, so equal counts keep first-seen order.
    pub fn top(&self, limit: usize) -> Vec<Keyword> {
        let mut ranked: Vec<Keyword> = self
            .order
            .iter()
            .map(|word| Keyword {
                word: word.clone(),
                count: self.counts[word],
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

/// Tokenize `text` and return its top [`TOP_KEYWORDS`] keywords.
pub fn rank_keywords(text: &str) -> Vec<Keyword> {
    WordFrequencies::from_words(text::words(text)).top(TOP_KEYWORDS)
}
