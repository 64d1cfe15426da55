//! Sequential byte source and sink for the transfer engines.
//!
//! The sender pulls fixed-size chunks from a [`ChunkReader`]; the receiver
//! appends ordered payload to any [`std::io::Write`] sink. Both ends are
//! strictly sequential — no random access, one cursor per side, owned
//! exclusively by its engine. Files close on drop, so a partially written
//! destination survives an interrupted transfer without any special
//! handling.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::Path;

/// A source that yields chunks of at most a fixed size.
///
/// Works over any [`Read`]; [`ChunkReader::open`] wraps a buffered file for
/// the common case.
#[derive(Debug)]
pub struct ChunkReader<R> {
    inner: R,
}

impl ChunkReader<BufReader<File>> {
    /// Open `path` for chunked reading.
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> ChunkReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next chunk of up to `max` bytes.
    ///
    /// Returns a short chunk at the tail of the stream and an empty vector
    /// at end-of-stream. A single underlying `read` may return fewer bytes
    /// than requested, so this loops until the chunk is full or the stream
    /// ends.
    pub fn read_chunk(&mut self, max: usize) -> io::Result<Vec<u8>> {
        let mut chunk = vec![0u8; max];
        let mut filled = 0;
        while filled < max {
            match self.inner.read(&mut chunk[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        chunk.truncate(filled);
        Ok(chunk)
    }
}

/// Create (truncating) the destination file as a buffered sequential sink.
pub fn create_sink(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Size of the source file in bytes, for the pre-transfer status line.
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn exact_multiple_chunks() {
        let mut r = ChunkReader::new(Cursor::new(vec![7u8; 1000]));
        assert_eq!(r.read_chunk(500).unwrap().len(), 500);
        assert_eq!(r.read_chunk(500).unwrap().len(), 500);
        assert!(r.read_chunk(500).unwrap().is_empty());
    }

    #[test]
    fn short_tail_chunk() {
        let mut r = ChunkReader::new(Cursor::new(vec![1u8; 1024]));
        assert_eq!(r.read_chunk(500).unwrap().len(), 500);
        assert_eq!(r.read_chunk(500).unwrap().len(), 500);
        assert_eq!(r.read_chunk(500).unwrap().len(), 24);
        assert!(r.read_chunk(500).unwrap().is_empty());
    }

    #[test]
    fn empty_source_yields_empty_chunk() {
        let mut r = ChunkReader::new(Cursor::new(Vec::new()));
        assert!(r.read_chunk(500).unwrap().is_empty());
    }

    #[test]
    fn chunk_preserves_bytes() {
        let data: Vec<u8> = (0..=255).collect();
        let mut r = ChunkReader::new(Cursor::new(data.clone()));
        let mut out = Vec::new();
        loop {
            let chunk = r.read_chunk(100).unwrap();
            if chunk.is_empty() {
                break;
            }
            out.extend_from_slice(&chunk);
        }
        assert_eq!(out, data);
    }
}
