//! Tantivy-based full-text search over stored digests.

use crate::digest::Digest;
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use thiserror::Error;

/// Memory budget for one index writer
const WRITER_HEAP_BYTES: usize = 50_000_000;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("index error: {0}")]
    IndexError(#[from] tantivy::TantivyError),
    #[error("query parse error: {0}")]
    QueryError(#[from] tantivy::query::QueryParserError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

struct Fields {
    source: Field,
    title: Field,
    key_points: Field,
    paragraphs: Field,
}

/// Search index mapping digest text back to its source.
pub struct SearchIndex {
    index: Index,
    fields: Fields,
}

impl SearchIndex {
    /// Open or create a search index at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SearchError> {
        let mut builder = Schema::builder();
        let fields = Fields {
            source: builder.add_text_field("source", STRING | STORED),
            title: builder.add_text_field("title", TEXT | STORED),
            key_points: builder.add_text_field("key_points", TEXT),
            paragraphs: builder.add_text_field("paragraphs", TEXT),
        };
        let schema = builder.build();

        let index_path = path.as_ref();
        std::fs::create_dir_all(index_path)?;

        let index = Index::create_in_dir(index_path, schema)
            .or_else(|_| Index::open_in_dir(index_path))?;

        Ok(Self { index, fields })
    }

    /// Index a digest, replacing any earlier entry for the same source
    pub fn index_digest(&self, source: &str, digest: &Digest) -> Result<(), SearchError> {
        let mut writer: IndexWriter = self.index.writer(WRITER_HEAP_BYTES)?;
        let summary = &digest.summary;

        writer.delete_term(Term::from_field_text(self.fields.source, source));

        let paragraphs = summary
            .paragraphs
            .iter()
            .map(|p| format!("{} {}", p.heading, p.content))
            .collect::<Vec<_>>()
            .join(" ");

        writer.add_document(doc!(
            self.fields.source => source,
            self.fields.title => summary.title.clone(),
            self.fields.key_points => summary.key_points.join(" "),
            self.fields.paragraphs => paragraphs,
        ))?;

        writer.commit()?;
        Ok(())
    }

    /// Sources of the digests best matching `query`, best first
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let reader: IndexReader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()?;
        let searcher = reader.searcher();

        let parser = QueryParser::for_index(
            &self.index,
            vec![
                self.fields.title,
                self.fields.key_points,
                self.fields.paragraphs,
            ],
        );
        let query = parser.parse_query(query)?;

        let mut sources = Vec::new();
        for (_score, address) in searcher.search(&query, &TopDocs::with_limit(limit))? {
            let found = searcher.doc::<TantivyDocument>(address)?;
            if let Some(source) = found.get_first(self.fields.source).and_then(|v| v.as_str()) {
                sources.push(source.to_string());
            }
        }

        Ok(sources)
    }
}
