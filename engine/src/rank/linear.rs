use super::{CosineRanker, NumberViewsRanker, PhraseRanker, QueryLikelihoodRanker};
use crate::index::Index;
use crate::DocId;

const COSINE_WEIGHT: f64 = 1.0;
const LIKELIHOOD_WEIGHT: f64 = 0.1;
const PHRASE_WEIGHT: f64 = 0.1;
const VIEWS_WEIGHT: f64 = 0.01;

/// Fixed-coefficient combination of the four concrete signals. Delegates to
/// each sub-model's per-document scoring function rather than re-deriving
/// their formulas.
#[derive(Debug)]
pub struct LinearRanker {
    cosine: CosineRanker,
    likelihood: QueryLikelihoodRanker,
    phrase: PhraseRanker,
    views: NumberViewsRanker,
}

impl LinearRanker {
    pub fn new(index: &Index, raw_query: &str) -> Self {
        Self {
            cosine: CosineRanker::new(index, raw_query),
            likelihood: QueryLikelihoodRanker::new(index, raw_query),
            phrase: PhraseRanker::new(index, raw_query),
            views: NumberViewsRanker,
        }
    }

    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        COSINE_WEIGHT * self.cosine.score(index, doc_id)
            + LIKELIHOOD_WEIGHT * self.likelihood.score(index, doc_id)
            + PHRASE_WEIGHT * self.phrase.score(index, doc_id)
            + VIEWS_WEIGHT * self.views.score(index, doc_id)
    }
}
