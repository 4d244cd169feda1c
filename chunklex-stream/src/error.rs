//! Error types for stream adapters

use chunklex_core::TokenizerError;
use thiserror::Error;

/// Errors raised while driving a tokenizer from a byte source
#[derive(Error, Debug)]
pub enum StreamError {
    /// The tokenizer rejected its input
    #[error("tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid UTF-8
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 {
        /// Stream offset of the first invalid byte
        offset: usize,
    },

    /// An emission could not be serialized
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The receiving side of a channel went away
    #[error("output channel disconnected")]
    Disconnected,
}

/// Result type for stream operations
pub type Result<T> = std::result::Result<T, StreamError>;
