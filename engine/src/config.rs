use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::index::IndexerType;

/// Engine configuration, read from a `key: value` options file.
///
/// Blank lines and `#` comments are ignored; lines without a `:` separator
/// are skipped with a warning. `corpus_path`, `index_path` and `indexer_type`
/// are required; any other keys are kept verbatim in [`extras`].
///
/// [`extras`]: EngineConfig::extras
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub corpus_path: PathBuf,
    pub index_path: PathBuf,
    pub indexer_type: IndexerType,
    pub extras: HashMap<String, String>,
}

impl EngineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("cannot read options file {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut options: HashMap<String, String> = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                tracing::warn!(line, "ignoring option line without a ':' separator");
                continue;
            };
            options.insert(key.trim().to_string(), value.trim().to_string());
        }

        let corpus_path = PathBuf::from(take_required(&mut options, "corpus_path")?);
        let index_path = PathBuf::from(take_required(&mut options, "index_path")?);
        let indexer_type: IndexerType = take_required(&mut options, "indexer_type")?.parse()?;

        Ok(Self {
            corpus_path,
            index_path,
            indexer_type,
            extras: options,
        })
    }
}

fn take_required(options: &mut HashMap<String, String>, key: &str) -> Result<String> {
    options
        .remove(key)
        .ok_or_else(|| EngineError::Config(format!("missing required option '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_and_extra_options() {
        let config = EngineConfig::parse(
            "# engine options\n\
             corpus_path: data/corpus.tsv\n\
             index_path: data/index\n\
             indexer_type: inverted_occurrence\n\
             \n\
             highlight: true\n",
        )
        .unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("data/corpus.tsv"));
        assert_eq!(config.index_path, PathBuf::from("data/index"));
        assert_eq!(config.indexer_type, IndexerType::InvertedOccurrence);
        assert_eq!(config.extras.get("highlight").map(String::as_str), Some("true"));
    }

    #[test]
    fn missing_required_option_is_an_error() {
        let err = EngineConfig::parse("corpus_path: a\nindex_path: b\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert!(err.to_string().contains("indexer_type"));
    }

    #[test]
    fn unknown_indexer_type_is_rejected_eagerly() {
        let err = EngineConfig::parse(
            "corpus_path: a\nindex_path: b\nindexer_type: btree\n",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::UnknownIndexerType(name) if name == "btree"));
    }
}
