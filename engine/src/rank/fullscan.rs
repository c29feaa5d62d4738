use crate::index::Index;
use crate::query::word_tokenize;
use crate::DocId;

/// Boolean title match: 1.0 if any query token appears verbatim among the
/// document's title tokens, 0.0 otherwise. No partial credit.
#[derive(Debug)]
pub struct FullscanRanker {
    tokens: Vec<String>,
}

impl FullscanRanker {
    pub fn new(raw_query: &str) -> Self {
        Self {
            tokens: word_tokenize(raw_query),
        }
    }

    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        let Some(doc) = index.document(doc_id) else {
            return 0.0;
        };
        for &term_id in &doc.title_terms {
            if let Some(term) = index.term(term_id) {
                if self.tokens.iter().any(|token| token == term) {
                    return 1.0;
                }
            }
        }
        0.0
    }
}
