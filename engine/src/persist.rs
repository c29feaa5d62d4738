//! On-disk index layout: a bincode blob for the index itself plus a small
//! JSON meta sidecar, both under one index directory.

use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{EngineError, Result};
use crate::index::{Index, IndexerType};

pub const INDEX_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    pub indexer_type: IndexerType,
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn index(&self) -> PathBuf {
        self.root.join("index.bin")
    }

    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

/// Writes the frozen index and its meta sidecar. Called once at the end of
/// `construct`.
pub fn save_index(paths: &IndexPaths, index: &Index) -> Result<()> {
    create_dir_all(&paths.root).map_err(|e| write_error(paths.root.clone(), e))?;

    let bytes = bincode::serialize(index)
        .map_err(|e| EngineError::IndexWrite {
            path: paths.index(),
            reason: e.to_string(),
        })?;
    let mut file = File::create(paths.index()).map_err(|e| write_error(paths.index(), e))?;
    file.write_all(&bytes)
        .map_err(|e| write_error(paths.index(), e))?;

    let meta = IndexMeta {
        version: INDEX_FORMAT_VERSION,
        indexer_type: index.kind(),
        num_docs: index.num_docs(),
        num_terms: index.num_terms() as u32,
        created_at: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::new()),
    };
    let json = serde_json::to_string_pretty(&meta).map_err(|e| EngineError::IndexWrite {
        path: paths.meta(),
        reason: e.to_string(),
    })?;
    std::fs::write(paths.meta(), json).map_err(|e| write_error(paths.meta(), e))?;

    tracing::info!(
        index = %paths.index().display(),
        bytes = bytes.len(),
        "saved search index"
    );
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<IndexMeta> {
    let text = std::fs::read_to_string(paths.meta()).map_err(|e| load_error(paths.meta(), e))?;
    serde_json::from_str(&text).map_err(|e| EngineError::IndexLoad {
        path: paths.meta(),
        reason: e.to_string(),
    })
}

/// Loads a persisted index and recomputes its aggregate statistics from the
/// deserialized structures. Called once at server startup; any inconsistency
/// is fatal here rather than at query time.
pub fn load_index(paths: &IndexPaths) -> Result<Index> {
    let meta = load_meta(paths)?;
    if meta.version != INDEX_FORMAT_VERSION {
        return Err(EngineError::IndexLoad {
            path: paths.meta(),
            reason: format!(
                "unsupported index format version {} (expected {INDEX_FORMAT_VERSION})",
                meta.version
            ),
        });
    }

    let mut bytes = Vec::new();
    let mut file = File::open(paths.index()).map_err(|e| load_error(paths.index(), e))?;
    file.read_to_end(&mut bytes)
        .map_err(|e| load_error(paths.index(), e))?;
    let mut index: Index = bincode::deserialize(&bytes).map_err(|e| EngineError::IndexLoad {
        path: paths.index(),
        reason: format!("corrupt index blob: {e}"),
    })?;

    if index.kind() != meta.indexer_type {
        return Err(EngineError::IndexLoad {
            path: paths.index(),
            reason: format!(
                "blob holds a {} index but meta declares {}",
                index.kind(),
                meta.indexer_type
            ),
        });
    }
    index.refresh_stats().map_err(|reason| EngineError::IndexLoad {
        path: paths.index(),
        reason,
    })?;
    if index.num_docs() != meta.num_docs {
        return Err(EngineError::IndexLoad {
            path: paths.index(),
            reason: format!(
                "blob holds {} documents but meta declares {}",
                index.num_docs(),
                meta.num_docs
            ),
        });
    }

    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.num_terms(),
        kind = %index.kind(),
        "loaded search index"
    );
    Ok(index)
}

fn write_error(path: PathBuf, source: std::io::Error) -> EngineError {
    EngineError::IndexWrite {
        path,
        reason: source.to_string(),
    }
}

fn load_error(path: PathBuf, source: std::io::Error) -> EngineError {
    EngineError::IndexLoad {
        path,
        reason: source.to_string(),
    }
}
