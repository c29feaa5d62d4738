//! Scoring models and bounded top-K selection.
//!
//! A [`Ranker`] is prepared once per query (cheap, stateless across queries)
//! and scores documents against the shared read-only index. Selection of the
//! model is one exhaustive match over [`RankerType`].

mod cosine;
mod fullscan;
mod likelihood;
mod linear;
mod phrase;
mod views;

pub use cosine::CosineRanker;
pub use fullscan::FullscanRanker;
pub use likelihood::QueryLikelihoodRanker;
pub use linear::LinearRanker;
pub use phrase::PhraseRanker;
pub use views::NumberViewsRanker;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use crate::document::ScoredDocument;
use crate::error::EngineError;
use crate::index::Index;
use crate::DocId;

/// The closed set of scoring models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankerType {
    Fullscan,
    Cosine,
    QueryLikelihood,
    Phrase,
    NumberViews,
    Linear,
}

impl RankerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankerType::Fullscan => "fullscan",
            RankerType::Cosine => "cosine",
            RankerType::QueryLikelihood => "querylikelihood",
            RankerType::Phrase => "phrase",
            RankerType::NumberViews => "numberviews",
            RankerType::Linear => "linear",
        }
    }
}

impl FromStr for RankerType {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, EngineError> {
        match name {
            "fullscan" => Ok(RankerType::Fullscan),
            "cosine" => Ok(RankerType::Cosine),
            "querylikelihood" => Ok(RankerType::QueryLikelihood),
            "phrase" => Ok(RankerType::Phrase),
            "numberviews" => Ok(RankerType::NumberViews),
            "linear" => Ok(RankerType::Linear),
            _ => Err(EngineError::UnknownRankerType(name.to_string())),
        }
    }
}

impl fmt::Display for RankerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scoring model prepared for one query.
#[derive(Debug)]
pub enum Ranker {
    Fullscan(FullscanRanker),
    Cosine(CosineRanker),
    QueryLikelihood(QueryLikelihoodRanker),
    Phrase(PhraseRanker),
    NumberViews(NumberViewsRanker),
    Linear(LinearRanker),
}

impl Ranker {
    pub fn new(kind: RankerType, index: &Index, raw_query: &str) -> Self {
        match kind {
            RankerType::Fullscan => Ranker::Fullscan(FullscanRanker::new(raw_query)),
            RankerType::Cosine => Ranker::Cosine(CosineRanker::new(index, raw_query)),
            RankerType::QueryLikelihood => {
                Ranker::QueryLikelihood(QueryLikelihoodRanker::new(index, raw_query))
            }
            RankerType::Phrase => Ranker::Phrase(PhraseRanker::new(index, raw_query)),
            RankerType::NumberViews => Ranker::NumberViews(NumberViewsRanker),
            RankerType::Linear => Ranker::Linear(LinearRanker::new(index, raw_query)),
        }
    }

    /// Scores one document under this model.
    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        match self {
            Ranker::Fullscan(model) => model.score(index, doc_id),
            Ranker::Cosine(model) => model.score(index, doc_id),
            Ranker::QueryLikelihood(model) => model.score(index, doc_id),
            Ranker::Phrase(model) => model.score(index, doc_id),
            Ranker::NumberViews(model) => model.score(index, doc_id),
            Ranker::Linear(model) => model.score(index, doc_id),
        }
    }

    /// Scores every document and returns at most `k` results, descending by
    /// score with ties broken by ascending document id.
    ///
    /// Selection keeps a size-`k` min-heap instead of sorting the full scored
    /// corpus, bounding memory to O(k) regardless of corpus size.
    pub fn run(&self, index: &Index, k: usize) -> Vec<ScoredDocument> {
        let mut heap: BinaryHeap<Reverse<ScoredDocument>> = BinaryHeap::with_capacity(k + 1);
        for doc_id in 0..index.num_docs() {
            let scored = ScoredDocument {
                doc_id,
                score: self.score(index, doc_id),
            };
            heap.push(Reverse(scored));
            if heap.len() > k {
                heap.pop();
            }
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse(scored)| scored)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawRecord;
    use crate::index::{IndexBuilder, IndexerType};

    const TOLERANCE: f64 = 1e-9;

    fn record(title: &str, body: &str, num_views: u32) -> RawRecord {
        RawRecord {
            title: title.to_string(),
            body: body.to_string(),
            num_views,
        }
    }

    /// apple appears only in doc 0; banana in docs 0 and 1; cherry everywhere.
    fn fruit_index(kind: IndexerType) -> Index {
        let mut builder = IndexBuilder::new();
        builder.add_record(&record("apple banana", "apple apple cherry", 5));
        builder.add_record(&record("banana cherry", "banana banana", 0));
        builder.add_record(&record("cherry", "durian", 12));
        builder.freeze(kind).unwrap()
    }

    #[test]
    fn fullscan_scores_title_matches_as_one() {
        let mut builder = IndexBuilder::new();
        builder.add_record(&record("test doc", "some body text", 0));
        let index = builder.freeze(IndexerType::Fullscan).unwrap();

        let hit = Ranker::new(RankerType::Fullscan, &index, "test");
        assert_eq!(hit.score(&index, 0), 1.0);
        let miss = Ranker::new(RankerType::Fullscan, &index, "zzz");
        assert_eq!(miss.score(&index, 0), 0.0);
    }

    #[test]
    fn cosine_matches_hand_computed_scores() {
        let index = fruit_index(IndexerType::InvertedOccurrence);
        let ranker = Ranker::new(RankerType::Cosine, &index, "apple");
        let results = ranker.run(&index, 3);

        // Query vector: apple with weight 1 * ln(3/1); its norm is ln 3.
        // Doc 0 holds apple*3, banana*1, cherry*1 with idf ln 3, ln(3/2), 0.
        let ln3 = 3.0f64.ln();
        let ln32 = 1.5f64.ln();
        let dot = 3.0 * ln3 * ln3;
        let doc_norm = (9.0 * ln3 * ln3 + ln32 * ln32).sqrt();
        let expected = dot / (ln3 * doc_norm);

        assert_eq!(results[0].doc_id, 0);
        assert!((results[0].score - expected).abs() < TOLERANCE);
        // Docs 1 and 2 never mention apple: score 0, ordered by doc id.
        assert_eq!(results[1].doc_id, 1);
        assert!(results[1].score.abs() < TOLERANCE);
        assert_eq!(results[2].doc_id, 2);
        assert!(results[2].score.abs() < TOLERANCE);
    }

    #[test]
    fn cosine_ignores_terms_missing_from_the_dictionary() {
        let index = fruit_index(IndexerType::InvertedOccurrence);
        let ranker = Ranker::new(RankerType::Cosine, &index, "unheard-of");
        for result in ranker.run(&index, 3) {
            assert_eq!(result.score, 0.0);
        }
    }

    #[test]
    fn query_likelihood_matches_hand_computed_scores() {
        let index = fruit_index(IndexerType::InvertedOccurrence);
        let ranker = Ranker::new(RankerType::QueryLikelihood, &index, "banana banana");

        // Doc 1 holds banana 3 times out of 4 terms; banana's collection
        // frequency is 4 of 11 total. Each of the two query tokens adds
        // ln(0.5 * 3/4 + 0.5 * 4/11).
        let per_token = (0.5_f64 * 3.0 / 4.0 + 0.5 * 4.0 / 11.0).ln();
        let expected = 2.0 * per_token;
        assert!((ranker.score(&index, 1) - expected).abs() < TOLERANCE);

        // Doc 2 has no banana, leaving only the collection component.
        let background = 2.0 * (0.5_f64 * 4.0 / 11.0).ln();
        assert!((ranker.score(&index, 2) - background).abs() < TOLERANCE);
    }

    #[test]
    fn query_likelihood_skips_terms_unseen_in_the_corpus() {
        let index = fruit_index(IndexerType::InvertedOccurrence);
        let ranker = Ranker::new(RankerType::QueryLikelihood, &index, "wholly unknown");
        assert_eq!(ranker.score(&index, 0), 0.0);
    }

    #[test]
    fn phrase_counts_adjacent_bigrams() {
        let mut builder = IndexBuilder::new();
        builder.add_record(&record("doc", "a b c a b", 0));
        builder.add_record(&record("doc", "b a c b a", 0));
        let index = builder.freeze(IndexerType::InvertedOccurrence).unwrap();

        let ranker = Ranker::new(RankerType::Phrase, &index, "\"a b\" c");
        // "a b" occurs twice in doc 0; the singleton group "c" has no bigrams.
        assert_eq!(ranker.score(&index, 0), 2.0);
        assert_eq!(ranker.score(&index, 1), 0.0);
    }

    #[test]
    fn number_views_is_query_independent() {
        let index = fruit_index(IndexerType::Fullscan);
        let ranker = Ranker::new(RankerType::NumberViews, &index, "anything");
        assert!((ranker.score(&index, 0) - 6.0f64.ln()).abs() < TOLERANCE);
        assert_eq!(ranker.score(&index, 1), 0.0);
        assert!((ranker.score(&index, 2) - 13.0f64.ln()).abs() < TOLERANCE);
    }

    #[test]
    fn linear_composes_its_sub_models() {
        let index = fruit_index(IndexerType::InvertedOccurrence);
        let query = "apple \"banana cherry\"";
        let linear = Ranker::new(RankerType::Linear, &index, query);

        let cosine = Ranker::new(RankerType::Cosine, &index, query);
        let likelihood = Ranker::new(RankerType::QueryLikelihood, &index, query);
        let phrase = Ranker::new(RankerType::Phrase, &index, query);
        let views = Ranker::new(RankerType::NumberViews, &index, query);
        for doc_id in 0..index.num_docs() {
            let expected = 1.0 * cosine.score(&index, doc_id)
                + 0.1 * likelihood.score(&index, doc_id)
                + 0.1 * phrase.score(&index, doc_id)
                + 0.01 * views.score(&index, doc_id);
            assert!((linear.score(&index, doc_id) - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn run_honors_the_top_k_contract() {
        let index = fruit_index(IndexerType::InvertedOccurrence);
        let ranker = Ranker::new(RankerType::Cosine, &index, "cherry banana");

        let top_two = ranker.run(&index, 2);
        assert_eq!(top_two.len(), 2);
        assert!(top_two[0].score >= top_two[1].score);

        // k at or above the corpus size returns the whole scored corpus.
        let all = ranker.run(&index, 10);
        assert_eq!(all.len(), 3);
        for pair in all.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        assert!(ranker.run(&index, 0).is_empty());
    }

    #[test]
    fn equal_scores_order_by_ascending_doc_id() {
        let mut builder = IndexBuilder::new();
        for _ in 0..4 {
            builder.add_record(&record("same title", "same body", 7));
        }
        let index = builder.freeze(IndexerType::Fullscan).unwrap();
        let ranker = Ranker::new(RankerType::NumberViews, &index, "");
        let results = ranker.run(&index, 4);
        let ids: Vec<u32> = results.iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
    }

    #[test]
    fn ranker_type_names_round_trip() {
        for kind in [
            RankerType::Fullscan,
            RankerType::Cosine,
            RankerType::QueryLikelihood,
            RankerType::Phrase,
            RankerType::NumberViews,
            RankerType::Linear,
        ] {
            assert_eq!(kind.as_str().parse::<RankerType>().unwrap(), kind);
        }
        assert!(matches!(
            "pagerank".parse::<RankerType>(),
            Err(EngineError::UnknownRankerType(_))
        ));
    }
}
