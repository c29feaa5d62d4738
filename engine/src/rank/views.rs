use crate::index::Index;
use crate::DocId;

/// Static popularity signal: `ln(1 + numberOfViews)`, independent of the
/// query.
#[derive(Debug)]
pub struct NumberViewsRanker;

impl NumberViewsRanker {
    pub fn score(&self, index: &Index, doc_id: DocId) -> f64 {
        index
            .document(doc_id)
            .map(|doc| (1.0 + f64::from(doc.num_views)).ln())
            .unwrap_or(0.0)
    }
}
