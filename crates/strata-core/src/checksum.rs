//! SHA-256 content hashing for migration files.

use sha2::{Digest, Sha256};
use std::io::Read;

/// Compute SHA256 checksum of a byte slice
pub fn compute_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Reader adapter that hashes every byte passing through it.
///
/// The migration parser tokenizes a file while fingerprinting the raw
/// byte stream; wrapping the file in a `HashingReader` keeps the two
/// in lockstep without a second pass.
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Consume the reader and return the hex digest of everything read so far.
    pub fn finalize(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_single_pass() {
        let data = b"CREATE TABLE t (id BIGINT);\n";
        let mut reader = HashingReader::new(&data[..]);
        let mut sink = Vec::new();
        reader.read_to_end(&mut sink).unwrap();
        assert_eq!(sink, data);
        assert_eq!(reader.finalize(), compute_checksum(data));
    }

    #[test]
    fn empty_stream_hashes_empty_input() {
        let reader = HashingReader::new(std::io::empty());
        assert_eq!(reader.finalize(), compute_checksum(b""));
    }
}
