//! Index construction and the read contract shared by every variant.
//!
//! An [`Index`] is built once by the single-owner [`IndexBuilder`], persisted,
//! and loaded read-only at serve time. The four variants differ only in how
//! postings are represented; selection is one exhaustive match over
//! [`IndexerType`].

pub mod builder;
mod store;

pub use builder::{construct, IndexBuilder};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dictionary::TermDictionary;
use crate::document::Document;
use crate::error::EngineError;
use crate::{DocId, TermId};
use store::PostingsStore;

/// The closed set of index variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexerType {
    /// Document table only; term statistics answered by scanning documents.
    Fullscan,
    /// Inverted postings carrying doc ids only.
    InvertedDoconly,
    /// Inverted postings carrying per-document term frequencies.
    InvertedOccurrence,
    /// Same data as `InvertedOccurrence`, postings stored through the codec
    /// and decoded lazily by cursor.
    InvertedCompressed,
}

impl IndexerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexerType::Fullscan => "fullscan",
            IndexerType::InvertedDoconly => "inverted_doconly",
            IndexerType::InvertedOccurrence => "inverted_occurrence",
            IndexerType::InvertedCompressed => "inverted_compressed",
        }
    }
}

impl FromStr for IndexerType {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, EngineError> {
        match name {
            "fullscan" => Ok(IndexerType::Fullscan),
            "inverted_doconly" => Ok(IndexerType::InvertedDoconly),
            "inverted_occurrence" => Ok(IndexerType::InvertedOccurrence),
            "inverted_compressed" => Ok(IndexerType::InvertedCompressed),
            _ => Err(EngineError::UnknownIndexerType(name.to_string())),
        }
    }
}

impl fmt::Display for IndexerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One term-in-document association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the term within the document, at least 1.
    pub term_frequency: u32,
}

/// Aggregate corpus statistics, accumulated during construction and
/// recomputed from the loaded structures at load time.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub num_docs: u32,
    /// Sum of all term frequencies across the corpus.
    pub total_term_count: u64,
    /// Collection term frequency per term id.
    pub ctf: Vec<u64>,
    /// Document frequency per term id.
    pub df: Vec<u32>,
}

/// A frozen, read-only index: term dictionary, document table, statistics and
/// the variant-specific postings. Safe to share across concurrent readers.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Index {
    dictionary: TermDictionary,
    documents: Vec<Document>,
    stats: CorpusStats,
    postings: PostingsStore,
}

impl Index {
    pub fn kind(&self) -> IndexerType {
        self.postings.kind()
    }

    pub fn num_docs(&self) -> u32 {
        self.stats.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.dictionary.len()
    }

    pub fn total_term_count(&self) -> u64 {
        self.stats.total_term_count
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Returns the document, or `None` when `doc_id` is out of `[0, N)`.
    pub fn document(&self, doc_id: DocId) -> Option<&Document> {
        self.documents.get(doc_id as usize)
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.id(term)
    }

    pub fn term(&self, term_id: TermId) -> Option<&str> {
        self.dictionary.term(term_id)
    }

    /// Collection term frequency. Unknown terms yield 0, never an error.
    pub fn term_frequency(&self, term: &str) -> u64 {
        self.term_id(term)
            .and_then(|t| self.stats.ctf.get(t as usize).copied())
            .unwrap_or(0)
    }

    /// Document frequency. Unknown terms yield 0, never an error.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.term_id(term)
            .and_then(|t| self.stats.df.get(t as usize).copied())
            .unwrap_or(0)
    }

    /// Occurrences of `term_id` within one document. Unknown terms and
    /// out-of-range documents yield 0.
    ///
    /// The fullscan variant answers by scanning the document's own term
    /// sequences; the doc-only variant carries no frequencies and answers
    /// membership (1 if the document contains the term, else 0).
    pub fn term_frequency_in_document(&self, term_id: TermId, doc_id: DocId) -> u32 {
        match &self.postings {
            PostingsStore::Fullscan => self
                .document(doc_id)
                .map(|doc| count_occurrences(doc, term_id))
                .unwrap_or(0),
            store => store.term_frequency_in_document(term_id, doc_id),
        }
    }

    /// Rebuilds the aggregate statistics from the document table and checks
    /// the postings against them. Called after deserialization so a stale or
    /// corrupt blob cannot smuggle in wrong counters.
    pub(crate) fn refresh_stats(&mut self) -> Result<(), String> {
        let num_terms = self.dictionary.len();
        let mut stats = CorpusStats {
            num_docs: self.documents.len() as u32,
            total_term_count: 0,
            ctf: vec![0; num_terms],
            df: vec![0; num_terms],
        };
        let mut seen: HashSet<TermId> = HashSet::new();
        for (position, doc) in self.documents.iter().enumerate() {
            if doc.doc_id as usize != position {
                return Err(format!(
                    "document {} stored at position {position}",
                    doc.doc_id
                ));
            }
            seen.clear();
            for &term_id in doc.title_terms.iter().chain(doc.body_terms.iter()) {
                let slot = stats
                    .ctf
                    .get_mut(term_id as usize)
                    .ok_or_else(|| format!("term id {term_id} out of dictionary range"))?;
                *slot += 1;
                stats.total_term_count += 1;
                if seen.insert(term_id) {
                    stats.df[term_id as usize] += 1;
                }
            }
        }
        self.postings.verify(&stats)?;
        if self.stats != stats {
            tracing::warn!("stored statistics differ from recomputed; using recomputed values");
            self.stats = stats;
        }
        Ok(())
    }
}

fn count_occurrences(doc: &Document, term_id: TermId) -> u32 {
    doc.title_terms
        .iter()
        .chain(doc.body_terms.iter())
        .filter(|&&t| t == term_id)
        .count() as u32
}
