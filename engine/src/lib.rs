//! Core search engine library: corpus ingestion, index construction and
//! persistence, and query-time ranking.
//!
//! The offline `indexer` binary drives [`index::construct`]; the `server`
//! binary loads the persisted index once via [`persist::load_index`] and then
//! shares it read-only across request handlers.

pub mod codec;
pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod document;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod rank;

/// Dense term identifier, assigned in first-seen order during construction.
pub type TermId = u32;

/// Dense document identifier, assigned in corpus-scan order.
pub type DocId = u32;

pub use document::{Document, ScoredDocument};
pub use error::EngineError;
pub use index::{Index, IndexerType};
pub use rank::{Ranker, RankerType};
