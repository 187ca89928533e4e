//! Streaming SQL statement splitter.
//!
//! Segments a raw migration byte stream into statements: a statement
//! ends at the first `;` whose line has been completed by a newline,
//! and the emitted token runs up to and including that newline. Two
//! terminators before the newline is an error; keeping statements to
//! one per line is what makes the single-line rollback-marker
//! classification in [`crate::parse`] reliable.

use crate::error::{CoreError, CoreResult};
use std::io::Read;

const READ_CHUNK: usize = 8 * 1024;

/// Lazy, finite, non-restartable iterator of raw statement strings.
pub struct StatementSplitter<R: Read> {
    reader: R,
    buf: Vec<u8>,
    eof: bool,
    done: bool,
}

impl<R: Read> StatementSplitter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            eof: false,
            done: false,
        }
    }

    /// Pull one chunk into the buffer. Returns false once the stream is dry.
    fn fill(&mut self) -> CoreResult<bool> {
        if self.eof {
            return Ok(false);
        }
        let mut chunk = [0u8; READ_CHUNK];
        let n = self.reader.read(&mut chunk)?;
        if n == 0 {
            self.eof = true;
            return Ok(false);
        }
        self.buf.extend_from_slice(&chunk[..n]);
        Ok(true)
    }

    /// Find `byte` at or after `from`, reading more input as needed.
    /// `Ok(None)` means the stream ended first.
    fn scan(&mut self, byte: u8, mut from: usize) -> CoreResult<Option<usize>> {
        loop {
            if let Some(i) = self.buf[from..].iter().position(|&b| b == byte) {
                return Ok(Some(from + i));
            }
            from = self.buf.len();
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    /// Emit whatever is still buffered as the final token.
    fn remainder(&mut self) -> Option<CoreResult<String>> {
        self.done = true;
        if self.buf.is_empty() {
            return None;
        }
        Some(token_utf8(std::mem::take(&mut self.buf)))
    }
}

fn token_utf8(bytes: Vec<u8>) -> CoreResult<String> {
    String::from_utf8(bytes).map_err(|_| CoreError::InvalidUtf8)
}

impl<R: Read> Iterator for StatementSplitter<R> {
    type Item = CoreResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let term = match self.scan(b';', 0) {
            Ok(Some(i)) => i,
            Ok(None) => return self.remainder(),
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        // The terminator only ends the statement once its line is
        // complete; until a newline shows up the `;` may be interior.
        let newline = match self.scan(b'\n', term + 1) {
            Ok(Some(i)) => i,
            Ok(None) => return self.remainder(),
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        if self.buf[term + 1..newline].contains(&b';') {
            self.done = true;
            let line_start = self.buf[..term]
                .iter()
                .rposition(|&b| b == b'\n')
                .map(|i| i + 1)
                .unwrap_or(0);
            let line = String::from_utf8_lossy(&self.buf[line_start..newline]);
            return Some(Err(CoreError::MultiStatementLine {
                line: line.trim().to_string(),
            }));
        }
        let token: Vec<u8> = self.buf.drain(..=newline).collect();
        Some(token_utf8(token))
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
