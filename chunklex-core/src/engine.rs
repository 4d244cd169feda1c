//! Incremental match engine
//!
//! The tokenizer accumulates chunks in a buffer and rescans it on every call.
//! A match that ends exactly at the end of the buffer could still grow once
//! more input arrives, so it is kept as a tentative match and re-evaluated on
//! the next call. Only the final flush may resolve a match touching the end.
//!
//! ```rust
//! use chunklex_core::{Emission, Tokenizer};
//! use regex::Regex;
//!
//! let mut words = Tokenizer::new(Regex::new(r"\w+").unwrap());
//! let mut out = Vec::new();
//! for chunk in ["The qu", "ick fox."] {
//!     out.extend(words.feed(chunk).unwrap());
//! }
//! out.extend(words.flush().unwrap());
//!
//! assert_eq!(out, vec![Emission::from("The"), Emission::from("quick"), Emission::from("fox")]);
//! ```

use crate::config::TokenizerConfig;
use crate::emission::{Emission, Sink};
use crate::error::{Result, TokenizerError};
use crate::pattern::{Match, Pattern};
use crate::position::{Position, PositionTracker};
use crate::projector::Projector;
use crate::splitter::LookbehindSplitter;
use log::{debug, trace};
use regex::Regex;

/// Lifecycle of a tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Open,
    Finished,
    Stalled { offset: usize },
}

/// Incremental regex tokenizer
///
/// Feed chunks with [`feed`](Self::feed) and finish with exactly one
/// [`flush`](Self::flush). The emitted sequence does not depend on how the
/// input was split into chunks.
#[derive(Debug)]
pub struct Tokenizer<P = Regex> {
    pattern: P,
    config: TokenizerConfig,
    splitter: LookbehindSplitter,
    /// Last consumed character followed by the unconsumed suffix of the input
    buffer: String,
    /// Byte length of the consumed character kept at the front of `buffer`
    context: usize,
    /// Stream offset of `buffer[0]`
    base: usize,
    tracker: PositionTracker,
    state: StreamState,
}

impl Tokenizer<Regex> {
    /// Compile `pattern` and build a tokenizer with `config`
    pub fn compile(pattern: &str, config: TokenizerConfig) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| TokenizerError::Configuration(format!("invalid pattern: {e}")))?;
        Self::with_config(config, pattern)
    }
}

impl<P: Pattern> Tokenizer<P> {
    /// Create a tokenizer with the default configuration
    pub fn new(pattern: P) -> Self {
        Self::from_parts(pattern, TokenizerConfig::default(), LookbehindSplitter::default())
    }

    /// Create a tokenizer with a custom configuration
    ///
    /// Fails if the configuration is invalid or names a leave-behind group the
    /// pattern does not have.
    pub fn with_config(config: TokenizerConfig, pattern: P) -> Result<Self> {
        config.validate()?;
        let splitter = LookbehindSplitter::resolve(config.leave_behind(), &pattern)?;
        debug!(
            "tokenizer ready: {} groups, leave-behind {:?}",
            pattern.group_count(),
            config.leave_behind()
        );
        Ok(Self::from_parts(pattern, config, splitter))
    }

    fn from_parts(pattern: P, config: TokenizerConfig, splitter: LookbehindSplitter) -> Self {
        Self {
            pattern,
            config,
            splitter,
            buffer: String::new(),
            context: 0,
            base: 0,
            tracker: PositionTracker::new(),
            state: StreamState::Open,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Get the pattern
    pub fn pattern(&self) -> &P {
        &self.pattern
    }

    /// Position of the first unconsumed character
    pub fn position(&self) -> Position {
        self.tracker.position()
    }

    /// Text held back for the next call
    pub fn buffered(&self) -> &str {
        &self.buffer[self.context..]
    }

    /// Bytes consumed from the stream so far
    pub fn consumed(&self) -> usize {
        self.base + self.context
    }

    /// Whether [`flush`](Self::flush) has completed
    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Finished
    }

    /// Append a chunk and return the units it resolves
    pub fn feed(&mut self, chunk: &str) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        self.feed_into(chunk, &mut out)?;
        Ok(out)
    }

    /// Signal end of input and return the remaining units
    pub fn flush(&mut self) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        self.flush_into(&mut out)?;
        Ok(out)
    }

    /// Append a chunk and push the units it resolves into `sink`
    pub fn feed_into<S: Sink>(&mut self, chunk: &str, sink: &mut S) -> Result<()> {
        self.ensure_open()?;
        self.buffer.push_str(chunk);
        self.scan(false, sink)
    }

    /// Signal end of input and push the remaining units into `sink`
    pub fn flush_into<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        self.ensure_open()?;
        self.scan(true, sink)?;

        if self.buffer.len() > self.context {
            let offset = self.consumed();
            let mut projector = Projector::new(&self.config, &mut self.tracker);
            projector.separator(&self.buffer[self.context..], offset, sink);
        }
        self.base += self.buffer.len();
        self.buffer.clear();
        self.context = 0;

        self.state = StreamState::Finished;
        debug!("tokenizer flushed after {} bytes", self.base);
        Ok(())
    }

    /// Tokenize a complete text in one call
    pub fn tokenize(mut self, text: &str) -> Result<Vec<Emission>> {
        let mut out = self.feed(text)?;
        self.flush_into(&mut out)?;
        Ok(out)
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            StreamState::Open => Ok(()),
            StreamState::Finished => Err(TokenizerError::StreamFinished),
            StreamState::Stalled { offset } => Err(TokenizerError::PatternStalled { offset }),
        }
    }

    /// Emit every resolvable match in the buffer and drop what was consumed
    ///
    /// Scanning starts after the context character, so anchors and word
    /// boundaries see the text that preceded the buffer.
    fn scan<S: Sink>(&mut self, last_chunk: bool, sink: &mut S) -> Result<()> {
        let Self {
            pattern,
            config,
            splitter,
            buffer,
            context,
            base,
            tracker,
            state,
        } = self;
        let mut projector = Projector::new(config, tracker);
        let mut next_offset = *context;
        let mut search_from = *context;

        while let Some(spans) = pattern.find_spans_at(buffer, search_from) {
            let Some(whole) = spans.first().cloned().flatten() else {
                break;
            };
            if whole.is_empty() {
                let offset = *base + whole.start;
                *state = StreamState::Stalled { offset };
                return Err(TokenizerError::PatternStalled { offset });
            }

            if whole.start > next_offset {
                projector.separator(
                    &buffer[next_offset..whole.start],
                    *base + next_offset,
                    sink,
                );
            }

            if last_chunk || whole.end < buffer.len() {
                let mut m = Match::new(buffer, spans, *base);
                splitter.split(&mut m, &mut projector, sink);
                projector.token(&m, sink);
                next_offset = whole.end;
                search_from = whole.end;
            } else {
                trace!(
                    "deferring tentative match at offset {}",
                    *base + whole.start
                );
                next_offset = whole.start;
                break;
            }
        }

        let keep_from = buffer[..next_offset]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        buffer.drain(..keep_from);
        *base += keep_from;
        *context = next_offset - keep_from;
        if buffer.len() > *context {
            trace!("retaining {} buffered bytes", buffer.len() - *context);
        }
        Ok(())
    }
}
