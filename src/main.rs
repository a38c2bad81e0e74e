//! SmartPDF CLI - document summaries and quizzes
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, acquiring document text and handling top-level errors.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Select;
use smartpdf::db::StoredDigest;
use smartpdf::{
    extract, rng, scraper, Config, Digest, Quiz, QuizScore, SearchIndex, Storage, Summary,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartpdf")]
#[command(author, version, about = "Document summaries and quizzes from the command line", long_about = None)]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of smartpdf.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a document (PDF, DOCX, PPTX, text, URL, or `-` for stdin)
    Summarise {
        /// Document path or URL; reads stdin when omitted and piped
        source: Option<String>,
        /// Summary density as a percentage of the document's sentences
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
        length: Option<u32>,
        /// Seed for reproducible quiz questions
        #[arg(long)]
        seed: Option<u64>,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        /// Print the digest as JSON
        #[arg(long)]
        json: bool,
        /// Skip quiz generation
        #[arg(long)]
        no_quiz: bool,
        /// Do not save the digest to history
        #[arg(long)]
        no_store: bool,
    },
    /// Take a multiple-choice quiz on a document
    Quiz {
        /// Document path or URL; reads stdin when omitted and piped
        source: Option<String>,
        /// Seed for reproducible quiz questions
        #[arg(long)]
        seed: Option<u64>,
        /// Generate new questions even if the document is in history
        #[arg(long)]
        fresh: bool,
        /// Print the quiz as JSON instead of asking the questions
        #[arg(long)]
        json: bool,
    },
    /// Search stored digests
    Search {
        /// Search query
        query: String,
    },
    /// List all stored digests
    List,
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Summarise {
            source,
            length,
            seed,
            raw,
            json,
            no_quiz,
            no_store,
        }) => {
            let (label, text) = read_source(source.as_deref()).await?;

            if raw {
                println!("\n=== {} ===\n", label);
                println!("{}", text);
                println!("\n--- Extracted {} characters ---", text.chars().count());
                return Ok(());
            }

            let length = length.unwrap_or(config.summary.length);
            let digest = if no_quiz || !config.quiz.enabled {
                Digest::summary_only(&text, length)
            } else {
                let mut rng = rng::generator(seed.or(config.quiz.seed));
                Digest::build(&text, length, &mut rng)
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&digest)?);
            } else {
                print_summary(&digest.summary);
                if !digest.quiz.is_empty() {
                    println!(
                        "\n🧠 {} quiz questions ready: smartpdf quiz {}",
                        digest.quiz.len(),
                        label
                    );
                }
            }

            if !no_store {
                save_digest(&config, StoredDigest::new(label, length, &text, digest));
            }
        }
        Some(Commands::Quiz {
            source,
            seed,
            fresh,
            json,
        }) => {
            let quiz = load_or_generate_quiz(&config, source.as_deref(), seed, fresh).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quiz)?);
            } else if quiz.is_empty() {
                println!("Not enough suitable sentences to build a quiz.");
            } else if atty::is(atty::Stream::Stdout) && atty::is(atty::Stream::Stdin) {
                let score = take_quiz(&quiz)?;
                print_score(&score);
            } else {
                print_quiz(&quiz);
            }
        }
        Some(Commands::Search { query }) => {
            let storage = Storage::open(&config.storage.path)?;

            // Try tantivy first, fall back to simple search
            let results = match SearchIndex::open(config.search_path()) {
                Ok(index) => match index.search(&query, 20) {
                    Ok(sources) if !sources.is_empty() => sources,
                    _ => simple_search(&storage, &query)?,
                },
                Err(e) => {
                    warn!(error = %e, "search index unavailable");
                    simple_search(&storage, &query)?
                }
            };

            if results.is_empty() {
                println!("No results found for: {}", query);
            } else {
                println!("Search results for '{}':\n", query);
                for source in &results {
                    if let Some(stored) = storage.get(source)? {
                        print_stored(&stored);
                    }
                }
            }
        }
        Some(Commands::List) => {
            let storage = Storage::open(&config.storage.path)?;
            let digests = storage.list_all()?;

            if digests.is_empty() {
                println!("No stored digests found.");
            } else {
                println!("Stored digests ({}):\n", digests.len());
                for stored in &digests {
                    print_stored(stored);
                }
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "smartpdf", &mut std::io::stdout());
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "smartpdf=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve `source` to a label and its document text.
///
/// `-`, or no source while stdin is piped, reads stdin. Extraction failures
/// are reported as errors; a document that merely lacks keywords is not.
async fn read_source(source: Option<&str>) -> anyhow::Result<(String, String)> {
    match source {
        Some("-") => read_stdin(),
        None if !atty::is(atty::Stream::Stdin) => read_stdin(),
        None => bail!("no document given: pass a file path, a URL, or `-` for stdin"),
        Some(url) if scraper::is_url(url) => {
            let page = scraper::fetch_content(url)
                .await
                .with_context(|| format!("failed to fetch {}", url))?;
            Ok((url.to_string(), page.document_text()))
        }
        Some(path) => {
            let path = Path::new(path);
            let text = extract::extract_file(path)
                .with_context(|| format!("failed to extract text from {}", path.display()))?;
            let label = std::fs::canonicalize(path)
                .unwrap_or_else(|_| path.to_path_buf())
                .display()
                .to_string();
            Ok((label, text))
        }
    }
}

fn read_stdin() -> anyhow::Result<(String, String)> {
    let text = extract::extract_reader(std::io::stdin().lock()).context("failed to read stdin")?;
    Ok(("stdin".to_string(), text))
}

/// Reuse the stored quiz for `source` when it was built from the same text,
/// unless `fresh`; otherwise generate one
async fn load_or_generate_quiz(
    config: &Config,
    source: Option<&str>,
    seed: Option<u64>,
    fresh: bool,
) -> anyhow::Result<Quiz> {
    let (label, text) = read_source(source).await?;

    if !fresh && seed.is_none() {
        match Storage::open(&config.storage.path) {
            Ok(storage) => {
                if let Some(quiz) = storage.reusable_quiz(&label, &text)? {
                    info!(source = %label, "using stored quiz");
                    return Ok(quiz);
                }
            }
            Err(e) => warn!(error = %e, "history unavailable, generating a new quiz"),
        }
    }

    let mut rng = rng::generator(seed.or(config.quiz.seed));
    Ok(smartpdf::generate_quiz(&text, &mut rng))
}

/// Persist a digest to sled and index it in tantivy.
///
/// History is best effort: failures are logged and the command still succeeds.
fn save_digest(config: &Config, stored: StoredDigest) {
    let saved = Storage::open(&config.storage.path).and_then(|storage| storage.store(&stored));
    if let Err(e) = saved {
        warn!(error = %e, path = %config.storage.path.display(), "failed to save digest");
        return;
    }

    match SearchIndex::open(config.search_path()) {
        Ok(index) => {
            if let Err(e) = index.index_digest(&stored.source, &stored.digest) {
                warn!(error = %e, "failed to index digest");
            }
        }
        Err(e) => warn!(error = %e, "search index unavailable"),
    }
}

fn print_summary(summary: &Summary) {
    if summary.title.is_empty() {
        println!("=== {} ===\n", "Untitled".dimmed());
    } else {
        println!("=== {} ===\n", summary.title.bold());
    }

    if summary.is_empty() {
        println!("No key sentences found: the document has no recurring keywords.");
        return;
    }

    println!("📌 Key Points:");
    for (i, point) in summary.key_points.iter().enumerate() {
        println!("  {}. {}", i + 1, point);
    }

    for paragraph in &summary.paragraphs {
        println!("\n{}", paragraph.heading.cyan().bold());
        println!("  {}", paragraph.content);
    }
}

/// Print questions with the answer marked, for non-interactive output
fn print_quiz(quiz: &Quiz) {
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.text);
        for (j, option) in question.options.iter().enumerate() {
            let marker = if question.is_correct(j) { "*" } else { " " };
            println!("   {} {}) {}", marker, (b'a' + j as u8) as char, option);
        }
        println!();
    }
}

fn take_quiz(quiz: &Quiz) -> anyhow::Result<QuizScore> {
    let mut answers = Vec::with_capacity(quiz.len());

    for (i, question) in quiz.questions.iter().enumerate() {
        let choice = Select::new()
            .with_prompt(format!("{}. {}", i + 1, question.text))
            .items(&question.options)
            .default(0)
            .interact_opt()?;

        match (choice, question.answer()) {
            (Some(c), _) if question.is_correct(c) => println!("  {}\n", "✓ Correct".green()),
            (Some(_), Some(answer)) => println!("  {} {}\n", "✗ Answer:".red(), answer),
            _ => println!("  {}\n", "Skipped".dimmed()),
        }
        answers.push(choice);
    }

    Ok(quiz.score(&answers))
}

fn print_score(score: &QuizScore) {
    let line = format!(
        "Your score: {}/{} ({}%)",
        score.correct, score.total, score.percentage
    );
    if score.percentage >= 50 {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.yellow().bold());
    }
}

fn print_stored(stored: &StoredDigest) {
    let summary = &stored.digest.summary;
    println!(
        "📄 {} ({})",
        summary.title,
        stored.created_at.format("%Y-%m-%d %H:%M")
    );
    println!("   {}", stored.source);
    if let Some(first) = summary.key_points.first() {
        println!("   {}", first);
    }
    println!(
        "   {} key points, {} quiz questions\n",
        summary.key_points.len(),
        stored.digest.quiz.len()
    );
}

/// Simple text-based search fallback when the tantivy index is not available
fn simple_search(storage: &Storage, query: &str) -> anyhow::Result<Vec<String>> {
    let query_lower = query.to_lowercase();
    let matches = |s: &str| s.to_lowercase().contains(&query_lower);

    let results = storage
        .list_all()?
        .into_iter()
        .filter(|stored| {
            let summary = &stored.digest.summary;
            matches(&summary.title)
                || summary.key_points.iter().any(|p| matches(p))
                || summary
                    .paragraphs
                    .iter()
                    .any(|p| matches(&p.heading) || matches(&p.content))
        })
        .map(|stored| stored.source)
        .collect();

    Ok(results)
}
