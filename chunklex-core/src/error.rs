//! Error types for tokenizer construction and scanning
//!
//! Every failure here is deterministic given the pattern, the configuration
//! and the input, so nothing is retried.

use thiserror::Error;

/// Errors raised while building or driving a [`Tokenizer`](crate::Tokenizer)
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// Malformed configuration value
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The leave-behind group does not exist in the pattern
    #[error("invalid leave-behind group {group}: {reason}")]
    LookbehindPath {
        /// The group as it was configured
        group: String,
        /// Why it could not be resolved
        reason: String,
    },

    /// The pattern produced a match that does not advance the search position
    #[error("pattern stalled: empty match at stream offset {offset}")]
    PatternStalled {
        /// Absolute byte offset of the empty match in the stream
        offset: usize,
    },

    /// `feed` or `flush` was called after the stream was flushed
    #[error("tokenizer already flushed")]
    StreamFinished,

    /// Reading a profile from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A profile could not be parsed
    #[error("invalid profile: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TokenizerError {
    /// Whether the tokenizer that raised this error can still make progress
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TokenizerError::PatternStalled { .. } | TokenizerError::StreamFinished
        )
    }
}

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;
