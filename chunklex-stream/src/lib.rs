//! Stream adapters for the chunklex tokenizer
//!
//! `chunklex-core` only knows about text chunks and sinks. This crate drives
//! it from byte sources:
//!
//! - [`TokenStream`]: pull emissions from any `Read` as an iterator
//! - [`spawn_tokenizer`]: tokenize on a background thread into a bounded
//!   channel, so a slow consumer throttles reading
//! - [`write_ndjson`]: write every emission as one JSON document per line
//!
//! Input is decoded as UTF-8; characters split across reads are reassembled
//! before they reach the tokenizer.
//!
//! # Example
//!
//! ```rust
//! use chunklex_core::{Emission, Tokenizer, TokenizerConfig};
//! use chunklex_stream::TokenStream;
//! use regex::Regex;
//! use std::io::Cursor;
//!
//! let config = TokenizerConfig::builder().read_size(4).build().unwrap();
//! let tokenizer = Tokenizer::with_config(config, Regex::new(r"\w+").unwrap()).unwrap();
//!
//! let words: Vec<Emission> = TokenStream::new(Cursor::new("lazy dog."), tokenizer)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(words, vec![Emission::from("lazy"), Emission::from("dog")]);
//! ```

#![warn(missing_docs)]

pub mod channel;
pub mod error;
pub mod ndjson;
pub mod reader;

pub use channel::{pump, spawn_tokenizer, ChannelSink};
pub use error::{Result, StreamError};
pub use ndjson::{write_ndjson, NdjsonWriter};
pub use reader::{TokenStream, Utf8Chunks};
