//! Fixed-size splitting of cleaned caption text.
//!
//! The record sink bounds every stored text block, so long captions are cut
//! into contiguous character slices of at most the configured length. The
//! split counts characters, never bytes, so multi-byte text is never cut
//! inside a code point.

use super::types::{ChunkingError, ContentChunk};

/// Split `text` into ordered chunks of at most `max_chars` characters.
///
/// Chunks are contiguous and non-overlapping; concatenating their texts
/// reproduces `text` exactly. Only the final chunk may be shorter. Empty
/// input yields an empty vector, and `max_chars == 0` is rejected.
pub fn chunk_text(text: &str, max_chars: usize) -> Result<Vec<ContentChunk>, ChunkingError> {
    if max_chars == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(max_chars)
            .map(|(offset, _)| offset)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split);
        chunks.push(ContentChunk {
            text: head.to_string(),
        });
        rest = tail;
    }
    Ok(chunks)
}
