//! Single-owner construction pass: one sequential scan over the corpus,
//! consumed and frozen into a read-only [`Index`].

use std::collections::HashMap;

use super::store::PostingsStore;
use super::{CorpusStats, Index, IndexerType, Posting};
use crate::codec;
use crate::config::EngineConfig;
use crate::corpus::{CorpusReader, RawRecord};
use crate::dictionary::TermDictionary;
use crate::document::Document;
use crate::error::Result;
use crate::persist::{self, IndexPaths};
use crate::{DocId, TermId};

/// Runs the offline build described by `config` and persists the result
/// under the configured index path.
pub fn construct(config: &EngineConfig) -> Result<Index> {
    tracing::info!(
        corpus = %config.corpus_path.display(),
        kind = %config.indexer_type,
        "constructing search index"
    );
    let reader = CorpusReader::open(&config.corpus_path)?;
    let mut builder = IndexBuilder::new();
    for record in reader {
        builder.add_record(&record?);
    }
    let index = builder.freeze(config.indexer_type)?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.num_terms(),
        total_terms = index.total_term_count(),
        "indexed corpus"
    );
    persist::save_index(&IndexPaths::new(&config.index_path), &index)?;
    Ok(index)
}

/// Accumulates dictionary, documents, statistics and raw postings. The only
/// mutable stage in the index lifecycle; [`freeze`] consumes it.
///
/// [`freeze`]: IndexBuilder::freeze
#[derive(Debug, Default)]
pub struct IndexBuilder {
    dictionary: TermDictionary,
    documents: Vec<Document>,
    stats: CorpusStats,
    postings: Vec<Vec<Posting>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes and interns one corpus record, assigning the next dense
    /// document id. Records must arrive in corpus order.
    pub fn add_record(&mut self, record: &RawRecord) {
        let doc_id = self.documents.len() as DocId;
        let title_terms = self.intern_terms(&record.title);
        let body_terms = self.intern_terms(&record.body);

        let mut frequencies: HashMap<TermId, u32> = HashMap::new();
        for &term_id in title_terms.iter().chain(body_terms.iter()) {
            *frequencies.entry(term_id).or_insert(0) += 1;
        }
        // Ascending doc ids keep every postings list sorted by construction.
        for (term_id, term_frequency) in frequencies {
            self.stats.df[term_id as usize] += 1;
            self.postings[term_id as usize].push(Posting {
                doc_id,
                term_frequency,
            });
        }

        self.stats.num_docs += 1;
        self.documents.push(Document {
            doc_id,
            title: record.title.clone(),
            url: String::new(),
            page_rank: 0.0,
            num_views: record.num_views,
            title_terms,
            body_terms,
        });
    }

    fn intern_terms(&mut self, text: &str) -> Vec<TermId> {
        let mut terms = Vec::new();
        for token in text.split_whitespace() {
            let term_id = self.dictionary.intern(token);
            if term_id as usize == self.stats.ctf.len() {
                self.stats.ctf.push(0);
                self.stats.df.push(0);
                self.postings.push(Vec::new());
            }
            self.stats.ctf[term_id as usize] += 1;
            self.stats.total_term_count += 1;
            terms.push(term_id);
        }
        terms
    }

    /// Consumes the builder and freezes its state into the requested
    /// read-only variant.
    pub fn freeze(self, kind: IndexerType) -> Result<Index> {
        let postings = match kind {
            IndexerType::Fullscan => PostingsStore::Fullscan,
            IndexerType::InvertedDoconly => PostingsStore::DocOnly(
                self.postings
                    .iter()
                    .map(|list| list.iter().map(|p| p.doc_id).collect())
                    .collect(),
            ),
            IndexerType::InvertedOccurrence => PostingsStore::Occurrence(self.postings),
            IndexerType::InvertedCompressed => {
                let mut blocks = Vec::with_capacity(self.postings.len());
                for list in &self.postings {
                    blocks.push(codec::encode_postings(list)?);
                }
                PostingsStore::Compressed(blocks)
            }
        };
        Ok(Index {
            dictionary: self.dictionary,
            documents: self.documents,
            stats: self.stats,
            postings,
        })
    }
}
