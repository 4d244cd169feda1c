//! Bounded-channel adapter with backpressure
//!
//! The tokenizer runs on its own thread and pushes into a `sync_channel` sized
//! by the `high_water_mark` hint. When the consumer falls behind, pushes block
//! and reading stops until the queue drains.

use crate::error::{Result, StreamError};
use crate::reader::Utf8Chunks;
use chunklex_core::{Emission, Pattern, Sink, Tokenizer};
use log::debug;
use std::io::Read;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Sink that forwards units into a bounded channel
pub struct ChannelSink {
    sender: SyncSender<Emission>,
    disconnected: bool,
}

impl ChannelSink {
    /// Wrap a sender
    pub fn new(sender: SyncSender<Emission>) -> Self {
        Self {
            sender,
            disconnected: false,
        }
    }

    /// Whether the receiver has been dropped
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl Sink for ChannelSink {
    fn push(&mut self, emission: Emission) {
        if !self.disconnected && self.sender.send(emission).is_err() {
            self.disconnected = true;
        }
    }
}

/// Feed `reader` through `tokenizer`, pushing every unit into `sender`
///
/// Stops with [`StreamError::Disconnected`] once the receiver is gone.
pub fn pump<R, P>(reader: R, mut tokenizer: Tokenizer<P>, sender: SyncSender<Emission>) -> Result<()>
where
    R: Read,
    P: Pattern,
{
    let mut chunks = Utf8Chunks::new(reader, tokenizer.config().hints().read_size);
    let mut sink = ChannelSink::new(sender);

    while let Some(chunk) = chunks.next_chunk()? {
        tokenizer.feed_into(&chunk, &mut sink)?;
        if sink.is_disconnected() {
            debug!("receiver dropped after {} bytes", chunks.offset());
            return Err(StreamError::Disconnected);
        }
    }

    tokenizer.flush_into(&mut sink)?;
    if sink.is_disconnected() {
        return Err(StreamError::Disconnected);
    }
    Ok(())
}

/// Tokenize `reader` on a background thread
///
/// Returns the receiving end of a channel bounded by the tokenizer's
/// `high_water_mark`, and the handle of the producing thread.
pub fn spawn_tokenizer<R, P>(
    reader: R,
    tokenizer: Tokenizer<P>,
) -> (Receiver<Emission>, JoinHandle<Result<()>>)
where
    R: Read + Send + 'static,
    P: Pattern + Send + 'static,
{
    let (sender, receiver) = mpsc::sync_channel(tokenizer.config().hints().high_water_mark);
    let handle = thread::spawn(move || pump(reader, tokenizer, sender));
    (receiver, handle)
}
