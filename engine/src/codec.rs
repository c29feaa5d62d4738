//! Delta + varint codec for compressed postings lists.
//!
//! Layout per list: the first doc id is written as a varint, each subsequent
//! doc id as the varint of its gap from the previous one, and every doc id is
//! followed by the varint term frequency. Varints are little-endian base-128:
//! 7 data bits per byte, MSB as continuation. An empty list encodes to zero
//! bytes.

use thiserror::Error;

use crate::index::Posting;
use crate::DocId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("doc ids are not strictly increasing at posting {index}: prev={prev}, next={next}")]
    NotStrictlyIncreasing { index: usize, prev: DocId, next: DocId },

    #[error("zero term frequency at posting {index}")]
    ZeroFrequency { index: usize },

    #[error("varint overflows u32 at byte {offset}")]
    Overflow { offset: usize },

    #[error("truncated varint at byte {offset}")]
    Truncated { offset: usize },
}

/// Appends the varint encoding of `value` to `out`.
pub fn encode_u32(mut value: u32, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Decodes one varint starting at `offset`, returning the value and the
/// offset just past it.
pub fn decode_u32(bytes: &[u8], offset: usize) -> Result<(u32, usize), CodecError> {
    let mut value = 0u32;
    let mut shift = 0u32;
    let mut pos = offset;
    loop {
        let byte = *bytes.get(pos).ok_or(CodecError::Truncated { offset: pos })?;
        let low = (byte & 0x7f) as u32;
        if shift > 28 || (shift == 28 && low > 0x0f) {
            return Err(CodecError::Overflow { offset: pos });
        }
        value |= low << shift;
        pos += 1;
        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
        shift += 7;
    }
}

/// Encodes a postings list sorted ascending by doc id. Rejects unsorted or
/// duplicate doc ids and zero frequencies.
pub fn encode_postings(postings: &[Posting]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(postings.len() * 2);
    let mut prev: Option<DocId> = None;
    for (index, posting) in postings.iter().enumerate() {
        let gap = match prev {
            None => posting.doc_id,
            Some(prev) if posting.doc_id > prev => posting.doc_id - prev,
            Some(prev) => {
                return Err(CodecError::NotStrictlyIncreasing {
                    index,
                    prev,
                    next: posting.doc_id,
                })
            }
        };
        if posting.term_frequency == 0 {
            return Err(CodecError::ZeroFrequency { index });
        }
        encode_u32(gap, &mut out);
        encode_u32(posting.term_frequency, &mut out);
        prev = Some(posting.doc_id);
    }
    Ok(out)
}

/// Decodes a full postings list. Equivalent to draining a [`PostingsCursor`].
pub fn decode_postings(bytes: &[u8]) -> Result<Vec<Posting>, CodecError> {
    PostingsCursor::new(bytes).collect()
}

/// Lazily decodes one posting at a time from an encoded block, reconstructing
/// doc ids by prefix-summing the stored gaps.
///
/// The cursor is finite and restartable: constructing a new cursor over the
/// same block starts a fresh pass without re-materializing anything.
pub struct PostingsCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    prev: Option<DocId>,
    index: usize,
}

impl<'a> PostingsCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            prev: None,
            index: 0,
        }
    }

    fn fail(&mut self, err: CodecError) -> Option<Result<Posting, CodecError>> {
        self.pos = self.bytes.len();
        Some(Err(err))
    }
}

impl Iterator for PostingsCursor<'_> {
    type Item = Result<Posting, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let (gap, pos) = match decode_u32(self.bytes, self.pos) {
            Ok(decoded) => decoded,
            Err(err) => return self.fail(err),
        };
        let (term_frequency, pos) = match decode_u32(self.bytes, pos) {
            Ok(decoded) => decoded,
            Err(err) => return self.fail(err),
        };
        let doc_id = match self.prev {
            None => gap,
            Some(prev) => {
                if gap == 0 {
                    return self.fail(CodecError::NotStrictlyIncreasing {
                        index: self.index,
                        prev,
                        next: prev,
                    });
                }
                match prev.checked_add(gap) {
                    Some(doc_id) => doc_id,
                    None => return self.fail(CodecError::Overflow { offset: self.pos }),
                }
            }
        };
        if term_frequency == 0 {
            return self.fail(CodecError::ZeroFrequency { index: self.index });
        }
        self.pos = pos;
        self.prev = Some(doc_id);
        self.index += 1;
        Some(Ok(Posting {
            doc_id,
            term_frequency,
        }))
    }
}
