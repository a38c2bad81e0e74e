//! Wrong answers for fill-in-the-blank questions.

use crate::rng::RandomSource;
use crate::text::char_len;

/// Distractors produced per question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Candidates whose length differs from the answer by this much or more are skipped.
const MAX_LENGTH_GAP: usize = 5;

/// Generic nouns distractors are drawn from.
pub const VOCABULARY: [&str; 20] = [
    "information",
    "development",
    "management",
    "technology",
    "process",
    "research",
    "application",
    "environment",
    "production",
    "knowledge",
    "analysis",
    "implementation",
    "framework",
    "structure",
    "function",
    "organization",
    "performance",
    "communication",
    "experience",
    "activity",
];

/// Candidates from [`VOCABULARY`] that may stand in for `correct`.
///
/// A candidate is dropped when either word contains the other, or when their
/// lengths are [`MAX_LENGTH_GAP`] or more characters apart.
pub fn candidates(correct: &str) -> Vec<&'static str> {
    let correct_len = char_len(correct);
    VOCABULARY
        .iter()
        .copied()
        .filter(|word| {
            !word.contains(correct)
                && !correct.contains(word)
                && char_len(word).abs_diff(correct_len) < MAX_LENGTH_GAP
        })
        .collect()
}

/// Draw [`DISTRACTOR_COUNT`] distinct candidates for `correct`.
///
/// When the pool runs dry the remaining slots are filled with `correct`
/// spelled backwards, which can repeat.
pub fn generate_distractors<R: RandomSource + ?Sized>(correct: &str, rng: &mut R) -> Vec<String> {
    let mut pool = candidates(correct);
    let mut selected = Vec::with_capacity(DISTRACTOR_COUNT);

    while selected.len() < DISTRACTOR_COUNT && !pool.is_empty() {
        let pick = rng.below(pool.len());
        selected.push(pool.remove(pick).to_string());
    }

    if selected.len() < DISTRACTOR_COUNT {
        let reversed: String = correct.chars().rev().collect();
        selected.resize(DISTRACTOR_COUNT, reversed);
    }
    selected
}
