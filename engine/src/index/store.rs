use serde::{Deserialize, Serialize};

use super::{CorpusStats, IndexerType, Posting};
use crate::codec::{self, PostingsCursor};
use crate::{DocId, TermId};

/// Variant-specific postings representation. Lists are indexed by term id and
/// each list is sorted ascending by doc id with no duplicates.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum PostingsStore {
    Fullscan,
    DocOnly(Vec<Vec<DocId>>),
    Occurrence(Vec<Vec<Posting>>),
    Compressed(Vec<Vec<u8>>),
}

impl PostingsStore {
    pub(crate) fn kind(&self) -> IndexerType {
        match self {
            PostingsStore::Fullscan => IndexerType::Fullscan,
            PostingsStore::DocOnly(_) => IndexerType::InvertedDoconly,
            PostingsStore::Occurrence(_) => IndexerType::InvertedOccurrence,
            PostingsStore::Compressed(_) => IndexerType::InvertedCompressed,
        }
    }

    /// Frequency lookup against the postings. The fullscan variant has no
    /// postings; `Index` answers it by scanning the document instead.
    pub(crate) fn term_frequency_in_document(&self, term_id: TermId, doc_id: DocId) -> u32 {
        match self {
            PostingsStore::Fullscan => 0,
            PostingsStore::DocOnly(lists) => lists
                .get(term_id as usize)
                .map(|list| u32::from(list.binary_search(&doc_id).is_ok()))
                .unwrap_or(0),
            PostingsStore::Occurrence(lists) => lists
                .get(term_id as usize)
                .and_then(|list| {
                    list.binary_search_by_key(&doc_id, |p| p.doc_id)
                        .ok()
                        .map(|i| list[i].term_frequency)
                })
                .unwrap_or(0),
            PostingsStore::Compressed(blocks) => blocks
                .get(term_id as usize)
                .map(|block| frequency_from_block(block, doc_id))
                .unwrap_or(0),
        }
    }

    /// Checks the postings against independently recomputed statistics.
    /// Compressed blocks are fully decoded here, so codec failures surface at
    /// load time rather than mid-query.
    pub(crate) fn verify(&self, stats: &CorpusStats) -> Result<(), String> {
        match self {
            PostingsStore::Fullscan => Ok(()),
            PostingsStore::DocOnly(lists) => {
                check_term_count(lists.len(), stats)?;
                for (term_id, list) in lists.iter().enumerate() {
                    if !list.windows(2).all(|w| w[0] < w[1]) {
                        return Err(format!(
                            "postings for term {term_id} are not strictly increasing"
                        ));
                    }
                    if list.len() as u32 != stats.df[term_id] {
                        return Err(format!("document frequency mismatch for term {term_id}"));
                    }
                }
                Ok(())
            }
            PostingsStore::Occurrence(lists) => {
                check_term_count(lists.len(), stats)?;
                for (term_id, list) in lists.iter().enumerate() {
                    verify_list(term_id, list, stats)?;
                }
                Ok(())
            }
            PostingsStore::Compressed(blocks) => {
                check_term_count(blocks.len(), stats)?;
                for (term_id, block) in blocks.iter().enumerate() {
                    let list = codec::decode_postings(block)
                        .map_err(|e| format!("postings for term {term_id}: {e}"))?;
                    verify_list(term_id, &list, stats)?;
                }
                Ok(())
            }
        }
    }
}

fn check_term_count(lists: usize, stats: &CorpusStats) -> Result<(), String> {
    if lists != stats.df.len() {
        return Err(format!(
            "postings cover {lists} terms but the dictionary has {}",
            stats.df.len()
        ));
    }
    Ok(())
}

fn verify_list(term_id: usize, list: &[Posting], stats: &CorpusStats) -> Result<(), String> {
    if !list.windows(2).all(|w| w[0].doc_id < w[1].doc_id) {
        return Err(format!(
            "postings for term {term_id} are not strictly increasing"
        ));
    }
    if list.iter().any(|p| p.term_frequency == 0) {
        return Err(format!("zero term frequency in postings for term {term_id}"));
    }
    if list.len() as u32 != stats.df[term_id] {
        return Err(format!("document frequency mismatch for term {term_id}"));
    }
    let total: u64 = list.iter().map(|p| u64::from(p.term_frequency)).sum();
    if total != stats.ctf[term_id] {
        return Err(format!("collection frequency mismatch for term {term_id}"));
    }
    Ok(())
}

/// Walks the cursor until it reaches or passes `doc_id`. Blocks are validated
/// at load time, so a decode error here is treated as absence.
fn frequency_from_block(block: &[u8], doc_id: DocId) -> u32 {
    for posting in PostingsCursor::new(block) {
        match posting {
            Ok(p) if p.doc_id == doc_id => return p.term_frequency,
            Ok(p) if p.doc_id > doc_id => return 0,
            Ok(_) => continue,
            Err(_) => return 0,
        }
    }
    0
}
