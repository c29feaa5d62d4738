use std::collections::HashMap;

use crate::document::Document;
use crate::index::Index;
use crate::query::word_tokenize;
use crate::{DocId, TermId};

/// Vector-space model: query and document as tf-idf vectors over the term-id
/// space, scored by cosine similarity. The document vector covers the
/// document's own term multiset.
#[derive(Debug)]
pub struct CosineRanker {
    weights: HashMap<TermId, f64>,
    query_norm: f64,
}

impl CosineRanker {
    pub fn new(index: &Index, raw_query: &str) -> Self {
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for token in word_tokenize(raw_query) {
            // Terms absent from the dictionary contribute weight 0.
            if let Some(term_id) = index.term_id(&token) {
                *counts.entry(term_id).or_insert(0) += 1;
            }
        }
        let mut weights = HashMap::with_capacity(counts.len());
        let mut norm = 0.0;
        for (term_id, count) in counts {
            let weight = f64::from(count) * idf(index, term_id);
            norm += weight * weight;
            weights.insert(term_id, weight);
        }
        Self {
            weights,
            query_norm: norm.sqrt(),
        }
    }

    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        if self.query_norm == 0.0 {
            return 0.0;
        }
        let Some(doc) = index.document(doc_id) else {
            return 0.0;
        };
        let mut dot = 0.0;
        let mut doc_norm = 0.0;
        for (term_id, count) in term_multiset(doc) {
            let weight = f64::from(count) * idf(index, term_id);
            doc_norm += weight * weight;
            if let Some(query_weight) = self.weights.get(&term_id) {
                dot += query_weight * weight;
            }
        }
        if doc_norm == 0.0 {
            return 0.0;
        }
        dot / (self.query_norm * doc_norm.sqrt())
    }
}

fn idf(index: &Index, term_id: TermId) -> f64 {
    let df = index
        .stats()
        .df
        .get(term_id as usize)
        .copied()
        .unwrap_or(0);
    if df == 0 {
        return 0.0;
    }
    (f64::from(index.num_docs()) / f64::from(df)).ln()
}

fn term_multiset(doc: &Document) -> HashMap<TermId, u32> {
    let mut counts = HashMap::new();
    for &term_id in doc.title_terms.iter().chain(doc.body_terms.iter()) {
        *counts.entry(term_id).or_insert(0) += 1;
    }
    counts
}
