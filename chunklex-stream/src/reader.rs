//! Pull-based adapter over `std::io::Read`

use crate::error::{Result, StreamError};
use chunklex_core::{Emission, Pattern, Tokenizer};
use log::debug;
use regex::Regex;
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

/// Decodes a byte source into UTF-8 chunks without splitting characters
///
/// A multi-byte sequence cut by a read is carried over to the next chunk.
pub struct Utf8Chunks<R> {
    reader: R,
    read_size: usize,
    /// Bytes of an incomplete sequence from the previous read
    carry: Vec<u8>,
    /// Stream offset of the next byte to decode
    offset: usize,
    done: bool,
}

impl<R: Read> Utf8Chunks<R> {
    /// Create a decoder reading `read_size` bytes at a time
    pub fn new(reader: R, read_size: usize) -> Self {
        Self {
            reader,
            read_size: read_size.max(1),
            carry: Vec::new(),
            offset: 0,
            done: false,
        }
    }

    /// Bytes decoded so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read and decode the next chunk; `None` at end of input
    pub fn next_chunk(&mut self) -> Result<Option<String>> {
        while !self.done {
            let mut data = std::mem::take(&mut self.carry);
            let start = data.len();
            data.resize(start + self.read_size, 0);

            let read = match self.reader.read(&mut data[start..]) {
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => {
                    data.truncate(start);
                    self.carry = data;
                    continue;
                }
                Err(e) => {
                    self.done = true;
                    return Err(e.into());
                }
            };
            data.truncate(start + read);

            if read == 0 {
                self.done = true;
                if !data.is_empty() {
                    // Input ended inside a multi-byte sequence
                    return Err(StreamError::InvalidUtf8 {
                        offset: self.offset,
                    });
                }
                break;
            }

            if let Err(e) = std::str::from_utf8(&data) {
                if e.error_len().is_some() {
                    self.done = true;
                    return Err(StreamError::InvalidUtf8 {
                        offset: self.offset + e.valid_up_to(),
                    });
                }
                self.carry = data.split_off(e.valid_up_to());
            }
            if data.is_empty() {
                continue;
            }

            self.offset += data.len();
            // Only the validated prefix is left in `data`
            let text = String::from_utf8(data).expect("validated prefix should be UTF-8");
            return Ok(Some(text));
        }
        Ok(None)
    }
}

/// Iterator of emissions produced by tokenizing a reader
///
/// Chunks are read lazily as the iterator is drained; the tokenizer is flushed
/// when the reader is exhausted. Dropping the iterator discards buffered input.
pub struct TokenStream<R, P = Regex> {
    chunks: Utf8Chunks<R>,
    tokenizer: Tokenizer<P>,
    pending: VecDeque<Emission>,
    finished: bool,
}

impl<R: Read, P: Pattern> TokenStream<R, P> {
    /// Tokenize `reader`, reading chunks of the configured `read_size`
    pub fn new(reader: R, tokenizer: Tokenizer<P>) -> Self {
        let hints = tokenizer.config().hints();
        Self {
            chunks: Utf8Chunks::new(reader, hints.read_size),
            tokenizer,
            pending: VecDeque::with_capacity(hints.high_water_mark),
            finished: false,
        }
    }

    /// Get the underlying tokenizer
    pub fn tokenizer(&self) -> &Tokenizer<P> {
        &self.tokenizer
    }

    fn fill(&mut self) -> Result<()> {
        match self.chunks.next_chunk()? {
            Some(chunk) => self.tokenizer.feed_into(&chunk, &mut self.pending)?,
            None => {
                self.tokenizer.flush_into(&mut self.pending)?;
                self.finished = true;
                debug!("token stream exhausted after {} bytes", self.chunks.offset());
            }
        }
        Ok(())
    }
}

impl<R: Read, P: Pattern> Iterator for TokenStream<R, P> {
    type Item = Result<Emission>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(emission) = self.pending.pop_front() {
                return Some(Ok(emission));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fill() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}
