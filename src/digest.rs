//! A summary and quiz built from the same document text.

use crate::quiz::{generate_quiz, Quiz};
use crate::rng::RandomSource;
use crate::summary::{summarize, Summary};
use serde::{Deserialize, Serialize};

/// Everything produced for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub summary: Summary,
    pub quiz: Quiz,
}

impl Digest {
    /// Summarize `text` at `length` percent and generate a quiz from it
    pub fn build<R: RandomSource + ?Sized>(text: &str, length: u32, rng: &mut R) -> Self {
        Self {
            summary: summarize(text, length),
            quiz: generate_quiz(text, rng),
        }
    }

    /// Summarize `text` without a quiz
    pub fn summary_only(text: &str, length: u32) -> Self {
        Self {
            summary: summarize(text, length),
            quiz: Quiz::default(),
        }
    }
}
