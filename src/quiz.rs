//! Fill-in-the-blank quiz generation and scoring.
//!
//! Questions come from randomly sampled sentences of the document. One
//! longer word is blanked out and offered among three distractors.

use crate::distractors::generate_distractors;
use crate::rng::{shuffle, RandomSource};
use crate::text::{self, char_len};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Upper bound on questions per quiz.
pub const MAX_QUESTIONS: usize = 6;

/// One question is attempted per this many usable sentences.
pub const SENTENCES_PER_QUESTION: usize = 5;

/// Random draws allowed when looking for a sentence for one question.
pub const SAMPLE_ATTEMPTS: usize = 20;

/// Sampled sentences must be at least this long...
pub const MIN_QUESTION_CHARS: usize = 20;

/// ...and shorter than this.
pub const MAX_QUESTION_CHARS: usize = 200;

/// Sentences with fewer words are not turned into questions.
pub const MIN_QUESTION_WORDS: usize = 5;

/// Only words longer than this can be blanked.
const MIN_TARGET_CHARS: usize = 4;

/// Replaces the answer in the question text.
pub const BLANK: &str = "___________";

/// Prefix of every question.
pub const QUESTION_PROMPT: &str = "What word completes this sentence: ";

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "and", "the", "that", "this", "with", "from", "their", "have", "been", "will", "would",
        "could", "should",
    ]
    .into_iter()
    .collect();
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The prompt, with the answer blanked out
    pub text: String,
    /// Four options in display order
    pub options: Vec<String>,
    /// Position of the answer in `options`
    pub correct_answer_index: usize,
}

impl Question {
    /// The correct option, or `None` if the index is out of range
    pub fn answer(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer_index
    }
}

/// A generated quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Score a set of answers, one per question in order.
    ///
    /// `None` marks an unanswered question. Missing trailing answers count as
    /// unanswered.
    pub fn score(&self, answers: &[Option<usize>]) -> QuizScore {
        let correct = self
            .questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| answer.is_some_and(|a| question.is_correct(a)))
            .count();
        QuizScore::new(correct, self.questions.len())
    }
}

/// Result of a scored quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    /// Rounded percentage, zero for an empty quiz
    pub percentage: u32,
}

impl QuizScore {
    pub fn new(correct: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (correct as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            correct,
            total,
            percentage,
        }
    }
}

/// Number of questions attempted for a document with `sentence_count` usable sentences.
pub fn question_target(sentence_count: usize) -> usize {
    MAX_QUESTIONS.min(sentence_count / SENTENCES_PER_QUESTION)
}

/// Generate a quiz from `text`.
///
/// Attempts that find no fresh sentence, or whose sentence has no word worth
/// blanking, are skipped, so the quiz can be shorter than [`question_target`].
pub fn generate_quiz<R: RandomSource + ?Sized>(text: &str, rng: &mut R) -> Quiz {
    let sentences: Vec<&str> = text::sentences(text, text::QUIZ_MIN_SENTENCE_CHARS).collect();
    let target = question_target(sentences.len());
    let mut used = HashSet::new();
    let mut questions = Vec::with_capacity(target);

    for attempt in 0..target {
        let Some(sentence) = sample_sentence(&sentences, &mut used, rng) else {
            debug!(attempt, "no unused sentence found");
            continue;
        };
        match question_from_sentence(sentence, rng) {
            Some(question) => questions.push(question),
            None => debug!(attempt, sentence, "sentence has no usable target word"),
        }
    }

    debug!(
        sentences = sentences.len(),
        target,
        generated = questions.len(),
        "generated quiz"
    );
    Quiz { questions }
}

/// Draw an unused sentence of acceptable length, giving up after [`SAMPLE_ATTEMPTS`].
fn sample_sentence<'a, R: RandomSource + ?Sized>(
    sentences: &[&'a str],
    used: &mut HashSet<&'a str>,
    rng: &mut R,
) -> Option<&'a str> {
    if sentences.is_empty() {
        return None;
    }
    for _ in 0..SAMPLE_ATTEMPTS {
        let candidate = sentences[rng.below(sentences.len())];
        let len = char_len(candidate);
        if !used.contains(candidate) && (MIN_QUESTION_CHARS..MAX_QUESTION_CHARS).contains(&len) {
            used.insert(candidate);
            return Some(candidate);
        }
    }
    None
}

/// Turn one sentence into a question, or `None` if it has no word to blank.
pub fn question_from_sentence<R: RandomSource + ?Sized>(
    sentence: &str,
    rng: &mut R,
) -> Option<Question> {
    let words: Vec<&str> = sentence.split(' ').collect();
    if words.len() < MIN_QUESTION_WORDS {
        return None;
    }

    let targets: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| {
            char_len(word) > MIN_TARGET_CHARS && !STOP_WORDS.contains(word.to_lowercase().as_str())
        })
        .collect();
    if targets.is_empty() {
        return None;
    }

    let answer = targets[rng.below(targets.len())];
    let position = words.iter().position(|word| *word == answer)?;
    let mut masked = words;
    masked[position] = BLANK;
    let text = format!("{QUESTION_PROMPT}{}?", masked.join(" "));

    let mut options = Vec::with_capacity(1 + crate::distractors::DISTRACTOR_COUNT);
    options.push(answer.to_string());
    options.extend(generate_distractors(answer, rng));
    shuffle(&mut options, rng);

    let correct_answer_index = options.iter().position(|option| option == answer)?;

    Some(Question {
        text,
        options,
        correct_answer_index,
    })
}
