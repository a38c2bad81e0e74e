//! Web page text acquisition.
//!
//! Uses reqwest for fetching and scraper for HTML parsing. The page title is
//! placed on the first line of the returned text, so the summary title
//! heuristic sees it.

use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// User-Agent string identifying this scraper
const USER_AGENT: &str = concat!("smartpdf/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocks shorter than this are navigation or boilerplate
const MIN_BLOCK_CHARS: usize = 20;

/// Regions tried, in order, before falling back to the whole page
const MAIN_REGIONS: [&str; 5] = ["article", "main", "[role='main']", ".content", "#content"];

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref H1: Selector = Selector::parse("h1").unwrap();
    static ref TEXT_BLOCKS: Selector = Selector::parse("p, h1, h2, h3, h4, h5, h6, li").unwrap();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("no readable text found at {0}")]
    NoContent(String),
}

/// Readable content of a web page
#[derive(Debug, Clone)]
pub struct WebPage {
    /// The original URL
    pub url: String,
    /// Page title
    pub title: Option<String>,
    /// Text blocks separated by blank lines
    pub body: String,
}

impl WebPage {
    /// Title and body as a single document
    pub fn document_text(&self) -> String {
        match &self.title {
            Some(title) => format!("{}\n\n{}", title, self.body),
            None => self.body.clone(),
        }
    }
}

/// True when `source` looks like an http(s) URL rather than a path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch `url` and extract its readable text
pub async fn fetch_content(url: &str) -> Result<WebPage, ScraperError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    info!(url, "fetching page");
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let page = parse_page(url, &html);
    if page.body.trim().is_empty() {
        return Err(ScraperError::NoContent(url.to_string()));
    }
    Ok(page)
}

/// Extract title and body text from an HTML document
pub fn parse_page(url: &str, html: &str) -> WebPage {
    let document = Html::parse_document(html);
    WebPage {
        url: url.to_string(),
        title: page_title(&document),
        body: main_text(&document),
    }
}

/// The page title from <title> or, failing that, the first <h1>
fn page_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        let title = collapse_whitespace(element);
        (!title.is_empty()).then_some(title)
    })
}

/// Text of the first non-empty main region, else of the whole page
fn main_text(document: &Html) -> String {
    for region in MAIN_REGIONS {
        let Ok(selector) = Selector::parse(region) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = blocks_text(element.select(&TEXT_BLOCKS));
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    blocks_text(document.select(&TEXT_BLOCKS))
}

fn blocks_text<'a>(blocks: impl Iterator<Item = ElementRef<'a>>) -> String {
    blocks
        .map(collapse_whitespace)
        .filter(|block| block.chars().count() > MIN_BLOCK_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn collapse_whitespace(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
