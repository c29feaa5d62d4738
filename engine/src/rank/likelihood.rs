use crate::index::Index;
use crate::query::word_tokenize;
use crate::{DocId, TermId};

/// Mixture weight between the document model and the collection model.
const LAMBDA: f64 = 0.5;

/// Unigram query-likelihood model, smoothed against collection statistics:
/// `P(t|d) = λ·tf/|d| + (1−λ)·ctf/total`, scored as the sum of per-token log
/// probabilities.
#[derive(Debug)]
pub struct QueryLikelihoodRanker {
    terms: Vec<QueryTerm>,
}

#[derive(Debug)]
struct QueryTerm {
    term_id: Option<TermId>,
    collection_frequency: u64,
}

impl QueryLikelihoodRanker {
    pub fn new(index: &Index, raw_query: &str) -> Self {
        let terms = word_tokenize(raw_query)
            .into_iter()
            .map(|token| {
                let term_id = index.term_id(&token);
                let collection_frequency = term_id
                    .and_then(|t| index.stats().ctf.get(t as usize).copied())
                    .unwrap_or(0);
                QueryTerm {
                    term_id,
                    collection_frequency,
                }
            })
            .collect();
        Self { terms }
    }

    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        let Some(doc) = index.document(doc_id) else {
            return 0.0;
        };
        let doc_len = doc.len() as f64;
        let corpus_len = index.total_term_count() as f64;
        let mut score = 0.0;
        // Tokens repeated in the query contribute once per occurrence.
        for term in &self.terms {
            let tf = term
                .term_id
                .map(|t| index.term_frequency_in_document(t, doc_id))
                .unwrap_or(0);
            let doc_prob = if doc_len > 0.0 {
                f64::from(tf) / doc_len
            } else {
                0.0
            };
            let collection_prob = if corpus_len > 0.0 {
                term.collection_frequency as f64 / corpus_len
            } else {
                0.0
            };
            let smoothed = LAMBDA * doc_prob + (1.0 - LAMBDA) * collection_prob;
            // A token the corpus has never seen has zero mass under both
            // models; skip it instead of collapsing the sum to -inf.
            if smoothed > 0.0 {
                score += smoothed.ln();
            }
        }
        score
    }
}
