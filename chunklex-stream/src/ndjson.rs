//! Newline-delimited JSON output

use crate::error::{Result, StreamError};
use crate::reader::Utf8Chunks;
use chunklex_core::{Emission, Pattern, Sink, Tokenizer};
use log::debug;
use std::io::{Read, Write};

/// Sink writing one JSON document per line
///
/// The first write error is kept and reported by [`finish`](Self::finish);
/// later units are dropped.
pub struct NdjsonWriter<W: Write> {
    writer: W,
    written: usize,
    error: Option<StreamError>,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Units written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the writer and return it, or the first error encountered
    pub fn finish(mut self) -> Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line(&mut self, emission: &Emission) -> Result<()> {
        serde_json::to_writer(&mut self.writer, emission)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Sink for NdjsonWriter<W> {
    fn push(&mut self, emission: Emission) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(&emission) {
            Ok(()) => self.written += 1,
            Err(e) => self.error = Some(e),
        }
    }
}

/// Tokenize `reader` and write every unit to `writer` as NDJSON
///
/// Returns the number of units written. Reading stops at the first write error.
pub fn write_ndjson<R, P, W>(reader: R, mut tokenizer: Tokenizer<P>, writer: W) -> Result<usize>
where
    R: Read,
    P: Pattern,
    W: Write,
{
    let mut chunks = Utf8Chunks::new(reader, tokenizer.config().hints().read_size);
    let mut sink = NdjsonWriter::new(writer);

    while let Some(chunk) = chunks.next_chunk()? {
        tokenizer.feed_into(&chunk, &mut sink)?;
        if let Some(error) = sink.error.take() {
            debug!("output failed after {} bytes of input", chunks.offset());
            return Err(error);
        }
    }
    tokenizer.flush_into(&mut sink)?;

    let written = sink.written();
    sink.finish()?;
    Ok(written)
}
