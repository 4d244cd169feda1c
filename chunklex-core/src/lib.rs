//! Incremental regex tokenizer for chunked text
//!
//! This crate re-segments a stream of text fragments into **tokens** (pattern
//! matches) and **separators** (the text between them), annotated with line
//! and column. The output is identical however the input was chunked: a match
//! touching the end of the buffered input is held back until more input or
//! the end of the stream proves it complete.
//!
//! # Architecture
//!
//! - **Position tracking**: [`PositionTracker`] follows line and column over
//!   consumed text
//! - **Projection**: [`Template`]s turn matches into [`Emission`]s
//! - **Pseudo-lookbehind**: a capture group can be reported as a separator
//!   ahead of its token
//! - **Engine**: [`Tokenizer`] owns the buffer and decides which matches are
//!   final
//!
//! # Example
//!
//! ```rust
//! use chunklex_core::{Emission, Tokenizer, TokenizerConfig};
//! use regex::Regex;
//!
//! let config = TokenizerConfig::builder().separator(true).build().unwrap();
//! let mut tokenizer = Tokenizer::with_config(config, Regex::new(r"\w+").unwrap()).unwrap();
//!
//! let mut out = tokenizer.feed("Hello, wor").unwrap();
//! out.extend(tokenizer.feed("ld!").unwrap());
//! out.extend(tokenizer.flush().unwrap());
//!
//! let text: Vec<_> = out.iter().filter_map(Emission::as_text).collect();
//! assert_eq!(text, vec!["Hello", ", ", "world", "!"]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod emission;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod position;
pub mod projector;
mod splitter;

pub use config::{
    BufferHints, GroupRef, Template, TokenizerConfig, TokenizerConfigBuilder, TokenizerProfile,
};
pub use emission::{Emission, Sink, SinkFn};
pub use engine::Tokenizer;
pub use error::{Result, TokenizerError};
pub use pattern::{Match, Pattern, Spans};
pub use position::{Position, PositionTracker};
