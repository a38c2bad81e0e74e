use fastrand::Rng;
use proptest::prelude::*;
use smartpdf::quiz::{question_target, BLANK, MAX_QUESTIONS, QUESTION_PROMPT};
use smartpdf::rng::RandomSource;
use smartpdf::{generate_quiz, Digest, Quiz};

/// Twelve distinct sentences, each with words worth blanking.
const GEOLOGY: &str = "Granite forms when magma cools slowly underground. \
    Basalt covers most of the ocean floor worldwide. \
    Sandstone records ancient deserts and shorelines. \
    Limestone often contains fossils of marine creatures. \
    Glaciers carved deep valleys across northern Europe. \
    Volcanoes release gases that change regional climate. \
    Earthquakes happen where tectonic plates grind together. \
    Rivers deposit sediment in broad fertile deltas. \
    Erosion slowly wears mountains into rolling hills. \
    Minerals crystallize from cooling hydrothermal fluids. \
    Geologists date rocks using radioactive isotopes. \
    Caves form where acidic water dissolves limestone.";

fn check_invariants(source: &str, quiz: &Quiz) {
    assert!(quiz.len() <= MAX_QUESTIONS);
    for question in &quiz.questions {
        assert_eq!(question.options.len(), 4);
        assert!(question.correct_answer_index < 4);

        let answer = question.answer().expect("index in range");
        let body = question
            .text
            .strip_prefix(QUESTION_PROMPT)
            .and_then(|t| t.strip_suffix('?'))
            .expect("prompt framing");
        assert!(body.contains(BLANK));
        let restored = body.replacen(BLANK, answer, 1);
        assert!(source.contains(&restored), "{restored:?} not in source");
    }
}

#[test]
fn empty_text_gives_empty_quiz() {
    let quiz = generate_quiz("", &mut Rng::with_seed(1));
    assert_eq!(quiz, Quiz { questions: vec![] });
}

#[test]
fn short_documents_get_fewer_questions() {
    assert_eq!(question_target(12), 2);
    for seed in 0..20 {
        let quiz = generate_quiz(GEOLOGY, &mut Rng::with_seed(seed));
        assert_eq!(quiz.len(), 2, "seed {seed}");
        check_invariants(GEOLOGY, &quiz);
    }
}

#[test]
fn sentences_without_targets_are_skipped() {
    let text = "it is a big red cat on the mat. we saw a dog run to the park. \
        you and I ate a pie at noon. he got a new hat for the day. \
        she ran far up the hill too.";
    assert_eq!(question_target(5), 1);
    let quiz = generate_quiz(text, &mut Rng::with_seed(9));
    assert!(quiz.is_empty());
}

#[test]
fn long_documents_cap_at_six_questions() {
    let text = std::iter::repeat(GEOLOGY).take(4).collect::<Vec<_>>().join(" ");
    let quiz = generate_quiz(&text, &mut Rng::with_seed(5));
    assert!(quiz.len() <= MAX_QUESTIONS);
    check_invariants(&text, &quiz);
}

#[test]
fn same_seed_same_quiz() {
    let a = generate_quiz(GEOLOGY, &mut Rng::with_seed(77));
    let b = generate_quiz(GEOLOGY, &mut Rng::with_seed(77));
    assert_eq!(a, b);
}

/// Always draws the last index
struct Last;

impl RandomSource for Last {
    fn below(&mut self, bound: usize) -> usize {
        bound - 1
    }
}

#[test]
fn custom_random_sources_plug_in() {
    let quiz = generate_quiz(GEOLOGY, &mut Last);
    // The last sentence is the only one ever drawn, so the second attempt finds nothing new.
    assert_eq!(quiz.len(), 1);
    let question = &quiz.questions[0];
    assert_eq!(question.answer(), Some("limestone"));
    check_invariants(GEOLOGY, &quiz);
}

#[test]
fn digest_serializes_answer_index() {
    let digest = Digest::build(GEOLOGY, 50, &mut Rng::with_seed(3));
    let json = serde_json::to_value(&digest).unwrap();
    let first = &json["quiz"]["questions"][0];
    assert!(first["correctAnswerIndex"].is_u64());
    assert_eq!(first["options"].as_array().map(Vec::len), Some(4));
}

const VOCAB: &[&str] = &[
    "granite", "basalt", "the", "and", "their", "should", "magma", "a", "of", "sediment",
    "rivers", "cools", "slowly", "is", "glaciers", "valleys", "information",
];

const TERMINATORS: &[&str] = &[". ", "! ", "? "];

fn document() -> impl Strategy<Value = String> {
    let sentence = prop::collection::vec(prop::sample::select(VOCAB), 1..16)
        .prop_map(|words| words.join(" "));
    let terminator = prop::sample::select(TERMINATORS);
    prop::collection::vec((sentence, terminator), 0..60).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(s, t)| format!("{s}{t}"))
            .collect::<String>()
    })
}

proptest! {
    #[test]
    fn answer_index_points_at_blanked_word(text in document(), seed in any::<u64>()) {
        let quiz = generate_quiz(&text, &mut Rng::with_seed(seed));
        check_invariants(&text, &quiz);
    }
}
