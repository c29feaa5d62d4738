use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;

/// Errors surfaced by the engine. Lookup misses (unknown term, out-of-range
/// document id) are not errors; those return `Option`/zero from the index
/// read API.
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O failure while reading the corpus. Fatal to the build.
    #[error("failed to read corpus {}: {source}", .path.display())]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus line that does not parse as `title\tbody\tnumberOfViews`.
    /// Fatal to the build; there is no partial-success mode.
    #[error("malformed corpus record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Failure while persisting a constructed index.
    #[error("failed to write index to {}: {reason}", .path.display())]
    IndexWrite { path: PathBuf, reason: String },

    /// I/O failure, corrupt blob, or codec decode failure while loading a
    /// persisted index. Fatal to server startup.
    #[error("failed to load index from {}: {reason}", .path.display())]
    IndexLoad { path: PathBuf, reason: String },

    /// Postings codec rejected its input.
    #[error("postings codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration named an indexer variant that does not exist.
    #[error("unknown indexer type: {0}")]
    UnknownIndexerType(String),

    /// A request or configuration named a ranker that does not exist.
    #[error("unknown ranker type: {0}")]
    UnknownRankerType(String),

    /// Unreadable configuration file or missing required option.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid search request parameter. Recoverable: reported back to the
    /// offending request only.
    #[error("invalid query parameter {name}: {reason}")]
    InvalidQueryParameter { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
