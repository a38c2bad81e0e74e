//! Plain-text extraction from local documents.
//!
//! PDFs go through pdf-extract. DOCX and PPTX files are zip archives of XML
//! parts, read with zip and quick-xml. Anything else is read as UTF-8 text.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const DOCX_BODY: &str = "word/document.xml";
const PPTX_SLIDE_PREFIX: &str = "ppt/slides/slide";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),
    #[error("failed to open document archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("malformed document XML: {0}")]
    Xml(String),
    #[error("unsupported document type: {0}")]
    Unsupported(String),
    #[error("no extractable text in {0}")]
    Empty(String),
}

/// Document formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Pptx,
    Text,
}

impl DocumentKind {
    /// Detect the kind of `path` from its extension
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "pptx" => Ok(Self::Pptx),
            // Legacy binary Office formats
            "doc" | "ppt" | "xls" => Err(ExtractError::Unsupported(ext)),
            _ => Ok(Self::Text),
        }
    }
}

/// Extract the text of the document at `path`.
///
/// A document that yields only whitespace is an [`ExtractError::Empty`] error.
pub fn extract_file(path: &Path) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_path(path)?;
    info!(path = %path.display(), ?kind, "extracting text");

    let text = match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        DocumentKind::Docx => extract_docx(path)?,
        DocumentKind::Pptx => extract_pptx(path)?,
        DocumentKind::Text => std::fs::read_to_string(path)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty(path.display().to_string()));
    }
    debug!(chars = text.chars().count(), "extracted text");
    Ok(text)
}

/// Read all of `reader` as text, rejecting blank input.
pub fn extract_reader<R: Read>(mut reader: R) -> Result<String, ExtractError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Err(ExtractError::Empty("stdin".to_string()));
    }
    Ok(text)
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let xml = read_entry(&mut archive, DOCX_BODY)?;
    xml_text(&xml, b"w:t", b"w:p")
}

fn extract_pptx(path: &Path) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;

    // slide10.xml must come after slide9.xml
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix(PPTX_SLIDE_PREFIX)?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort();

    let mut pages = Vec::with_capacity(slides.len());
    for (_, name) in slides {
        let xml = read_entry(&mut archive, &name)?;
        pages.push(xml_text(&xml, b"a:t", b"a:p")?);
    }
    Ok(pages.join("\n\n"))
}

fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Result<String, ExtractError> {
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Collect the text inside `text_tag` elements, ending a line at each
/// closing `paragraph_tag`.
fn xml_text(xml: &str, text_tag: &[u8], paragraph_tag: &[u8]) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == text_tag => in_text = true,
            Ok(Event::End(e)) if e.name().as_ref() == text_tag => in_text = false,
            Ok(Event::End(e)) if e.name().as_ref() == paragraph_tag => out.push('\n'),
            Ok(Event::Text(t)) if in_text => {
                let text = t.decode().map_err(|e| ExtractError::Xml(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::GeneralRef(r)) if in_text => {
                let name = r.decode().map_err(|e| ExtractError::Xml(e.to_string()))?;
                if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(&name) {
                    out.push_str(resolved);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::Xml(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(out)
}
