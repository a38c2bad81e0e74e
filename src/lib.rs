//! # SmartPDF
//!
//! Extractive document summaries and fill-in-the-blank quizzes.
//!
//! ## Features
//!
//! - **Heuristic summaries**: a title, ranked key points and headed paragraphs cut from
//!   the sentences that mention the document's most frequent words
//! - **Quizzes**: multiple-choice questions built by blanking a word out of a sampled sentence
//! - **Reproducible**: all randomness goes through [`rng::RandomSource`], so a seed fixes a quiz
//! - **History**: sled keeps past digests, tantivy makes them searchable
//!
//! ```
//! let text = "The cat sat. The cat sat on the mat. Cats are animals.";
//! let summary = smartpdf::summarize(text, 50);
//! assert_eq!(summary.title, "The cat sat");
//! ```

pub mod config;
pub mod db;
pub mod digest;
pub mod distractors;
pub mod extract;
pub mod keywords;
pub mod paragraphs;
pub mod quiz;
pub mod rng;
pub mod scraper;
pub mod search;
pub mod storage;
pub mod summary;
pub mod text;

pub use config::Config;
pub use db::{SearchIndex, Storage};
pub use digest::Digest;
pub use quiz::{generate_quiz, Question, Quiz, QuizScore};
pub use summary::{summarize, Paragraph, Summary};
