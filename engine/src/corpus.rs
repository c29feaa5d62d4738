use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

/// One unparsed corpus document: a single `title\tbody\tnumberOfViews` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub title: String,
    pub body: String,
    pub num_views: u32,
}

/// Streams corpus records from a tab-separated file, one document per line.
///
/// The sequence is lazy, finite and non-restartable; any I/O error or
/// malformed line aborts the build through the returned error.
#[derive(Debug)]
pub struct CorpusReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl CorpusReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| EngineError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for CorpusReader {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(source) => {
                return Some(Err(EngineError::CorpusRead {
                    path: self.path.clone(),
                    source,
                }))
            }
        };
        self.line_no += 1;
        Some(parse_record(&line, self.line_no))
    }
}

/// Fields beyond the third are ignored, matching the corpus file contract.
fn parse_record(line: &str, line_no: usize) -> Result<RawRecord> {
    let mut fields = line.split('\t');
    let (Some(title), Some(body), Some(views)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(EngineError::MalformedRecord {
            line: line_no,
            reason: "expected three tab-separated fields".to_string(),
        });
    };
    let num_views = views.parse::<u32>().map_err(|_| EngineError::MalformedRecord {
        line: line_no,
        reason: format!("invalid view count '{views}'"),
    })?;
    Ok(RawRecord {
        title: title.to_string(),
        body: body.to_string(),
        num_views,
    })
}
