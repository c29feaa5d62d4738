use crate::index::Index;
use crate::query::phrase_tokenize;
use crate::{DocId, TermId};

/// Counts adjacent-bigram matches between each quoted phrase group and the
/// document's body term sequence. The score is the raw match count summed
/// over all groups.
#[derive(Debug)]
pub struct PhraseRanker {
    phrases: Vec<Vec<Option<TermId>>>,
}

impl PhraseRanker {
    pub fn new(index: &Index, raw_query: &str) -> Self {
        let phrases = phrase_tokenize(raw_query)
            .into_iter()
            .map(|group| group.iter().map(|token| index.term_id(token)).collect())
            .collect();
        Self { phrases }
    }

    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        let Some(doc) = index.document(doc_id) else {
            return 0.0;
        };
        let body = &doc.body_terms;
        let mut matches = 0u64;
        for group in &self.phrases {
            for bigram in group.windows(2) {
                // A term missing from the dictionary can never match.
                let (Some(first), Some(second)) = (bigram[0], bigram[1]) else {
                    continue;
                };
                matches += body
                    .windows(2)
                    .filter(|pair| pair[0] == first && pair[1] == second)
                    .count() as u64;
            }
        }
        matches as f64
    }
}
